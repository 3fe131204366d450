//! Extraction output: embedded images and the response envelope.

use serde::Serialize;

use super::fields::FieldSet;

/// Position of an image within a document, 0-based on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Ordinal {
    /// Page index.
    pub page_index: usize,
    /// Index of the image within its page's listing.
    pub image_index: usize,
}

impl Ordinal {
    pub fn new(page_index: usize, image_index: usize) -> Self {
        Self { page_index, image_index }
    }

    /// 1-based (page, image) pair, as used in file names.
    pub fn one_based(&self) -> (usize, usize) {
        (self.page_index + 1, self.image_index + 1)
    }
}

/// An image embedded in a PDF page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    /// Position in walk order.
    pub ordinal: Ordinal,
    /// Raw encoded stream payload, exactly as stored in the PDF.
    pub data: Vec<u8>,
    /// File extension implied by the payload.
    pub extension: &'static str,
}

impl EmbeddedImage {
    pub fn new(ordinal: Ordinal, data: Vec<u8>, extension: &'static str) -> Self {
        Self {
            ordinal,
            data,
            extension,
        }
    }

    /// Deterministic file name: `image_{page}_{index}.{ext}`, 1-based.
    pub fn file_name(&self) -> String {
        let (page, index) = self.ordinal.one_based();
        format!("image_{}_{}.{}", page, index, self.extension)
    }
}

/// Successful extraction of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    /// Matched identity fields.
    #[serde(rename = "Aadhaar Details")]
    pub fields: FieldSet,

    /// Reference to each stored image, in walk order.
    #[serde(rename = "Images")]
    pub images: Vec<String>,

    /// Base64 of each image payload, same order as `images`.
    #[serde(rename = "Images (Base64)")]
    pub images_base64: Vec<String>,
}

/// Response for a single request: the result, or an error message alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExtractionResponse {
    Success(ExtractionResult),
    Failure { error: String },
}

impl ExtractionResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionResponse::Success(_))
    }

    /// The error message, if the request failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            ExtractionResponse::Success(_) => None,
            ExtractionResponse::Failure { error } => Some(error),
        }
    }
}

impl From<crate::Result<ExtractionResult>> for ExtractionResponse {
    fn from(result: crate::Result<ExtractionResult>) -> Self {
        match result {
            Ok(result) => ExtractionResponse::Success(result),
            Err(e) => ExtractionResponse::Failure {
                error: e.to_string(),
            },
        }
    }
}
