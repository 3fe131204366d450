//! Config command - inspect and edit the storage and PDF settings.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;
use tracing::debug;

use aadhaar_core::AadhaarConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective settings as JSON
    Show,

    /// Write a settings file populated with defaults
    Init(InitArgs),

    /// Print one setting
    Get {
        /// Dotted key, e.g. "storage.base_url"
        key: String,
    },

    /// Change one existing setting
    Set {
        /// Dotted key, e.g. "pdf.require_pages"
        key: String,
        /// JSON value, or a bare string
        value: String,
    },

    /// Print where the settings file lives
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Write to this path instead of the settings location
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Replace a file that already exists
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.action {
        ConfigAction::Show => show(&path),
        ConfigAction::Init(init) => init_file(init, &path),
        ConfigAction::Get { key } => get(&path, &key),
        ConfigAction::Set { key, value } => set(&path, &key, &value),
        ConfigAction::Path => print_path(&path),
    }
}

/// `<config dir>/aadhaar/config.json`, or `./aadhaar/config.json` when the
/// platform has no config directory.
pub fn default_config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("aadhaar").join("config.json")
}

/// Load the configuration used by processing commands.
///
/// An explicit path must exist; otherwise the default file is used when
/// present, falling back to built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<AadhaarConfig> {
    if let Some(path) = config_path {
        return Ok(AadhaarConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(AadhaarConfig::from_file(&default_path)?)
    } else {
        Ok(AadhaarConfig::default())
    }
}

fn read_or_default(path: &Path) -> anyhow::Result<AadhaarConfig> {
    if path.exists() {
        Ok(AadhaarConfig::from_file(path)?)
    } else {
        Ok(AadhaarConfig::default())
    }
}

fn write(config: &AadhaarConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    config.save(path)?;
    Ok(())
}

fn show(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        eprintln!(
            "{} {} does not exist, using built-in settings.",
            style("ℹ").blue(),
            path.display()
        );
    }

    let config = read_or_default(path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn init_file(args: InitArgs, path: &Path) -> anyhow::Result<()> {
    let target = args.output.unwrap_or_else(|| path.to_path_buf());
    if target.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (pass --force to replace it)",
            target.display()
        );
    }

    write(&AadhaarConfig::default(), &target)?;
    println!("{} Wrote default settings to {}", style("✓").green(), target.display());
    Ok(())
}

fn get(path: &Path, key: &str) -> anyhow::Result<()> {
    let tree = serde_json::to_value(read_or_default(path)?)?;
    let value = key
        .split('.')
        .try_fold(&tree, |node, part| node.get(part))
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Replace an existing leaf; unknown keys are rejected rather than added.
fn set(path: &Path, key: &str, raw: &str) -> anyhow::Result<()> {
    let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_owned()));

    let mut tree = serde_json::to_value(read_or_default(path)?)?;
    let (section, leaf) = match key.rsplit_once('.') {
        Some((section, leaf)) => (Some(section), leaf),
        None => (None, key),
    };

    let parent = match section {
        Some(section) => section
            .split('.')
            .try_fold(&mut tree, |node, part| node.get_mut(part)),
        None => Some(&mut tree),
    };
    let slot = parent
        .and_then(Value::as_object_mut)
        .and_then(|object| object.get_mut(leaf))
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    *slot = value.clone();

    // Round-trip through the typed config so bad values are rejected
    let config: AadhaarConfig = serde_json::from_value(tree)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
    write(&config, path)?;

    println!("{} {} = {}", style("✓").green(), key, value);
    Ok(())
}

fn print_path(path: &Path) -> anyhow::Result<()> {
    println!("Settings file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("present").green());
    } else {
        println!("Status: {}", style("missing").yellow());
        println!("Create it with 'aadhaar config init'.");
    }

    Ok(())
}
