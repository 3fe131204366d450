//! PDF processing module.

mod gate;
mod images;
mod text;

pub use gate::{gate, SecuredDocument};
pub use images::{walk_images, ImageWalker};
pub use text::extract_text;

use std::sync::Arc;

use lopdf::encryption::DecryptionError;
use lopdf::Document;
use tracing::debug;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// A parsed PDF owned by a single request.
///
/// Keeps the bytes it was parsed from so the document can be re-acquired
/// after authentication.
pub struct PdfHandle {
    document: Document,
    source: Arc<[u8]>,
    locked: bool,
}

impl PdfHandle {
    /// Parse a PDF from bytes.
    ///
    /// Documents encrypted with an empty user password are unlocked here
    /// and do not require a credential. A security handler that cannot be
    /// used at all fails with [`PdfError::Security`].
    pub fn open(source: impl Into<Arc<[u8]>>) -> Result<Self> {
        let source = source.into();
        let document = load(&source, None)?;

        let locked = document.is_encrypted();
        if locked {
            // The reader already tried the empty password
            check_password(&document, "")?;
            debug!("PDF requires a password");
        } else if document.was_encrypted() {
            debug!("Decrypted PDF with empty password");
        }

        Ok(Self {
            document,
            source,
            locked,
        })
    }

    /// The underlying document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Fail with [`PdfError::NoPages`] if the page tree is empty.
    pub fn ensure_pages(&self) -> Result<()> {
        if self.page_count() == 0 {
            return Err(PdfError::NoPages);
        }
        Ok(())
    }
}

/// Parse `source`, decrypting with `password` when the document needs one.
fn load(source: &[u8], password: Option<&str>) -> Result<Document> {
    let loaded = match password {
        Some(password) => Document::load_mem_with_password(source, password),
        None => Document::load_mem(source),
    };

    loaded.map_err(|e| match e {
        lopdf::Error::Decryption(_)
        | lopdf::Error::InvalidPassword
        | lopdf::Error::UnsupportedSecurityHandler(_) => PdfError::Security(e.to_string()),
        _ => PdfError::Parse(e.to_string()),
    })
}

/// Check `password` against the standard security handler.
///
/// Only a rejected password yields `Ok(false)`; an unusable handler is an
/// error.
fn check_password(document: &Document, password: &str) -> Result<bool> {
    match document.authenticate_password(password) {
        Ok(()) => Ok(true),
        Err(lopdf::Error::Decryption(
            DecryptionError::IncorrectPassword | DecryptionError::StringPrep(_),
        )) => Ok(false),
        Err(e) => Err(PdfError::Security(e.to_string())),
    }
}

impl std::fmt::Debug for PdfHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfHandle")
            .field("pages", &self.page_count())
            .field("source_len", &self.source.len())
            .field("locked", &self.locked)
            .finish()
    }
}

impl SecuredDocument for PdfHandle {
    fn is_locked(&self) -> bool {
        self.locked
    }

    fn authenticate(&mut self, password: &str) -> Result<bool> {
        if !self.locked {
            return Ok(true);
        }
        if !check_password(&self.document, password)? {
            debug!("Password rejected by security handler");
            return Ok(false);
        }

        self.document = load(&self.source, Some(password))?;
        self.locked = self.document.is_encrypted();
        Ok(true)
    }

    fn reacquire(self, password: &str) -> Result<Self> {
        let source = Arc::clone(&self.source);
        drop(self);

        let document = load(&source, Some(password))?;
        Ok(Self {
            locked: document.is_encrypted(),
            document,
            source,
        })
    }
}
