//! Request pipeline: gate, text, fields, images.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::fields::match_fields;
use crate::models::config::AadhaarConfig;
use crate::models::extraction::{ExtractionResponse, ExtractionResult};
use crate::pdf::{extract_text, gate, walk_images, PdfHandle};
use crate::storage::ImageStore;

/// Runs one document through the extraction pipeline.
///
/// Output locations come from the configuration and the image store given
/// at construction; nothing is read from process-wide state.
pub struct Pipeline<S> {
    config: AadhaarConfig,
    store: S,
}

impl<S: ImageStore> Pipeline<S> {
    pub fn new(config: AadhaarConfig, store: S) -> Self {
        Self { config, store }
    }

    /// Handle an uploaded file end to end and build the response envelope.
    ///
    /// The upload is written to a uniquely named transient file in the
    /// upload directory, which is removed before returning on every path.
    pub fn process_upload(
        &self,
        file_name: &str,
        data: &[u8],
        password: Option<&str>,
    ) -> ExtractionResponse {
        let start = Instant::now();
        let result = self.try_process_upload(file_name, data, password);

        match &result {
            Ok(r) => info!(
                "Processed {} in {:?}: {} images",
                file_name,
                start.elapsed(),
                r.images.len()
            ),
            Err(e) => warn!("Failed to process {}: {}", file_name, e),
        }
        result.into()
    }

    fn try_process_upload(
        &self,
        file_name: &str,
        data: &[u8],
        password: Option<&str>,
    ) -> Result<ExtractionResult> {
        let upload = self.persist_upload(file_name, data)?;
        debug!("Stored upload {} at {}", file_name, upload.path().display());

        let bytes = fs::read(upload.path())?;
        let result = self.process(bytes, password);

        discard_upload(upload);
        result
    }

    fn persist_upload(&self, file_name: &str, data: &[u8]) -> Result<NamedTempFile> {
        let upload_dir = &self.config.storage.upload_dir;
        fs::create_dir_all(upload_dir)?;

        let suffix = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();

        let mut upload = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(&suffix)
            .tempfile_in(upload_dir)?;
        std::io::Write::write_all(&mut upload, data)?;
        Ok(upload)
    }

    /// Run the pipeline over an in-memory PDF.
    ///
    /// Fails as a whole: fields are not returned if image extraction fails.
    pub fn process(
        &self,
        data: impl Into<Arc<[u8]>>,
        password: Option<&str>,
    ) -> Result<ExtractionResult> {
        let handle = PdfHandle::open(data)?;
        let handle = gate(handle, password)?;
        if self.config.pdf.require_pages {
            handle.ensure_pages()?;
        }

        let text = extract_text(&handle)?;
        let fields = match_fields(&text);

        let mut images = Vec::new();
        let mut images_base64 = Vec::new();
        for image in walk_images(&handle) {
            let image = image?;
            images.push(self.store.store(&image)?);
            images_base64.push(BASE64.encode(&image.data));
        }

        debug!(
            "Extracted {} fields and {} images from {} pages",
            fields.matched_count(),
            images.len(),
            handle.page_count()
        );

        Ok(ExtractionResult {
            fields,
            images,
            images_base64,
        })
    }
}

/// Remove a transient upload. A failure is logged and never replaces the
/// outcome of the request.
fn discard_upload(upload: NamedTempFile) {
    let path = upload.path().to_path_buf();
    if let Err(e) = upload.close() {
        warn!("Failed to remove upload {}: {}", path.display(), e);
    }
}
