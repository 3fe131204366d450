//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AadhaarError, Result};

/// Main configuration for the aadhaar pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AadhaarConfig {
    /// Upload and image storage configuration.
    pub storage: StorageConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,
}

/// Where uploads and extracted images live, and how images are addressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for transient uploaded PDFs.
    pub upload_dir: PathBuf,

    /// Directory extracted images are written to.
    pub image_dir: PathBuf,

    /// Base URL of the static file server that serves `image_dir`.
    pub base_url: String,

    /// URL path segment under `base_url` that maps to `image_dir`.
    pub images_route: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            image_dir: PathBuf::from("images"),
            base_url: "http://127.0.0.1:8000".to_string(),
            images_route: "images".to_string(),
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Reject documents whose page tree is empty.
    pub require_pages: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { require_pages: true }
    }
}

impl AadhaarConfig {
    /// Load configuration from a JSON file.
    ///
    /// Read failures are [`AadhaarError::Io`]; malformed content is
    /// [`AadhaarError::Config`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| AadhaarError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| AadhaarError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
