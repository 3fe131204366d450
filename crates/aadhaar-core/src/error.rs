//! Error types for the aadhaar-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the aadhaar library.
#[derive(Error, Debug)]
pub enum AadhaarError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Password handling rejected the document. Messages are surfaced verbatim.
    #[error(transparent)]
    Gate(#[from] GateError),

    /// Persisting an extracted image failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text from page {page}: {reason}")]
    TextExtraction { page: u32, reason: String },

    /// Failed to extract images from PDF.
    #[error("failed to extract images: {0}")]
    ImageExtraction(String),

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The security handler is unsupported or its dictionary is damaged.
    #[error("unsupported or damaged encryption: {0}")]
    Security(String),
}

/// Outcomes of the decryption gate that stop the pipeline.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateError {
    /// The document is encrypted and no password was given.
    #[error("PDF is password protected. Please provide a password.")]
    PasswordRequired,

    /// The given password was rejected.
    #[error("Invalid password. Please try again.")]
    InvalidPassword,

    /// Authentication succeeded but the re-acquired handle is still locked.
    #[error("PDF is still encrypted after authentication.")]
    StillEncrypted,
}

/// Errors raised by image stores.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Writing an image file failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for the aadhaar library.
pub type Result<T> = std::result::Result<T, AadhaarError>;
