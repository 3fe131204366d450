//! Password handling for encrypted documents.

use tracing::{debug, warn};

use super::Result;
use crate::error::GateError;

/// A document that may need a credential before it can be read.
pub trait SecuredDocument: Sized {
    /// Whether the document still needs a password.
    fn is_locked(&self) -> bool;

    /// Try to unlock the document in place.
    ///
    /// Returns `Ok(false)` only when the password is rejected. Failures of
    /// the security handler itself are errors.
    fn authenticate(&mut self, password: &str) -> Result<bool>;

    /// Release this handle and open a fresh one from the same source,
    /// applying `password` to it.
    fn reacquire(self, password: &str) -> Result<Self>;
}

/// Let an unlocked document through, or authenticate a locked one.
///
/// A successful authentication is followed by an explicit re-acquire of the
/// handle; a fresh handle that still reports a locked state is rejected.
pub fn gate<D: SecuredDocument>(document: D, password: Option<&str>) -> crate::Result<D> {
    if !document.is_locked() {
        return Ok(document);
    }

    let password = match password {
        Some(p) if !p.is_empty() => p,
        _ => {
            warn!("Encrypted PDF submitted without a password");
            return Err(GateError::PasswordRequired.into());
        }
    };

    let mut document = document;
    if !document.authenticate(password)? {
        warn!("Rejected password for encrypted PDF");
        return Err(GateError::InvalidPassword.into());
    }

    debug!("Password accepted, re-acquiring document handle");
    let fresh = document.reacquire(password)?;
    if fresh.is_locked() {
        warn!("PDF still locked after authentication");
        return Err(GateError::StillEncrypted.into());
    }

    Ok(fresh)
}
