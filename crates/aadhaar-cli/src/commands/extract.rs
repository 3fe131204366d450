//! Extract command - read details and images from a single PDF.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use aadhaar_core::{
    ExtractionResponse, ExtractionResult, Field, FsImageStore, ImageStore, MemoryImageStore,
    Pipeline,
};

use super::config::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Password for encrypted PDFs
    #[arg(short, long, env = "AADHAAR_PDF_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Directory for extracted images (overrides config)
    #[arg(long)]
    image_dir: Option<PathBuf>,

    /// Directory for transient uploads (overrides config)
    #[arg(long)]
    upload_dir: Option<PathBuf>,

    /// Base URL used in image references (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// Keep extracted images in memory instead of writing them
    #[arg(long)]
    dry_run: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON response document
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(dir) = &args.image_dir {
        config.storage.image_dir = dir.clone();
    }
    if let Some(dir) = &args.upload_dir {
        config.storage.upload_dir = dir.clone();
    }
    if let Some(url) = &args.base_url {
        config.storage.base_url = url.clone();
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let file_name = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.pdf".to_string());
    let data = fs::read(&args.input)?;

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Extracting {}...", file_name));

    let password = args.password.clone();
    let response = if args.dry_run {
        let pipeline = Pipeline::new(config, MemoryImageStore::new());
        run_pipeline(pipeline, file_name, data, password).await?
    } else {
        let store = FsImageStore::from_config(&config.storage);
        run_pipeline(Pipeline::new(config, store), file_name, data, password).await?
    };

    pb.finish_and_clear();

    let output = format_response(&response, args.format, args.pretty)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    match response.error() {
        Some(error) => anyhow::bail!("{}", error),
        None => Ok(()),
    }
}

/// Run the blocking pipeline off the async runtime.
async fn run_pipeline<S>(
    pipeline: Pipeline<S>,
    file_name: String,
    data: Vec<u8>,
    password: Option<String>,
) -> anyhow::Result<ExtractionResponse>
where
    S: ImageStore + Send + 'static,
{
    let response = tokio::task::spawn_blocking(move || {
        pipeline.process_upload(&file_name, &data, password.as_deref())
    })
    .await?;
    Ok(response)
}

fn format_response(
    response: &ExtractionResponse,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(response)?),
        OutputFormat::Json => Ok(serde_json::to_string(response)?),
        OutputFormat::Text => Ok(match response {
            ExtractionResponse::Success(result) => format_text(result),
            ExtractionResponse::Failure { error } => format!("{} {}", style("✗").red(), error),
        }),
    }
}

fn format_text(result: &ExtractionResult) -> String {
    let width = Field::ALL.iter().map(|f| f.label().len()).max().unwrap_or(0) + 1;
    let mut output = String::new();

    output.push_str("Aadhaar details:\n");
    for (field, value) in result.fields.iter() {
        let label = format!("{}:", field.label());
        let value = value
            .map(|v| v.replace('\n', &format!("\n  {:width$} ", "", width = width)))
            .unwrap_or_else(|| style("-").dim().to_string());
        output.push_str(&format!("  {:width$} {}\n", label, value, width = width));
    }

    if let Some(dob) = result.fields.date_of_birth() {
        output.push_str(&format!("\nDate of birth: {}\n", dob.format("%Y-%m-%d")));
    }

    output.push_str(&format!("\nImages ({}):\n", result.images.len()));
    for image in &result.images {
        output.push_str(&format!("  {}\n", image));
    }

    output
}
