use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex, PoisonError};

use source_client::SourceClientError;
use thiserror::Error;
use tokio::sync::AcquireError;

/// Errors that can end a concatenation request.
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum ConcatError {
    /// A single input could not be classified or retrieved.  Displays as `"<input>: <cause>"`.
    #[error("{0}")]
    SourceError(Arc<SourceClientError>),

    #[error("Task Runtime Error: {0}")]
    TaskJoinError(String),

    #[error("Permit Acquisition Error: {0}")]
    PermitAcquisitionError(Arc<AcquireError>),

    #[error("Internal Error: {0}")]
    InternalError(String),
}

pub type Result<T> = std::result::Result<T, ConcatError>;

impl From<SourceClientError> for ConcatError {
    fn from(err: SourceClientError) -> Self {
        ConcatError::SourceError(Arc::new(err))
    }
}

impl From<AcquireError> for ConcatError {
    fn from(err: AcquireError) -> Self {
        ConcatError::PermitAcquisitionError(Arc::new(err))
    }
}

impl From<tokio::task::JoinError> for ConcatError {
    fn from(err: tokio::task::JoinError) -> Self {
        ConcatError::TaskJoinError(err.to_string())
    }
}

impl ConcatError {
    /// The underlying source error, if this failure came from a specific input.
    pub fn source_error(&self) -> Option<&SourceClientError> {
        match self {
            ConcatError::SourceError(e) => Some(e),
            _ => None,
        }
    }
}

/// Records the first failure of a request so that every task of that request can see it.
/// Uses an atomic flag for fast checking and a mutex for error storage.
pub struct ErrorState {
    has_error: AtomicBool,
    stored_error: Mutex<Option<ConcatError>>,
}

impl Default for ErrorState {
    fn default() -> Self {
        Self {
            has_error: AtomicBool::new(false),
            stored_error: Mutex::new(None),
        }
    }
}

impl ErrorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored error, if any.
    pub fn check(&self) -> Result<()> {
        if self.has_error.load(AtomicOrdering::Acquire) {
            let error_guard = self.stored_error.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(err) = error_guard.as_ref() {
                return Err(err.clone());
            }
            return Err(ConcatError::InternalError("Unknown error recorded by a fetch task".to_string()));
        }
        Ok(())
    }

    /// Stores `error` unless an error was already stored.  Returns true if this call stored it.
    pub fn set(&self, error: ConcatError) -> bool {
        let mut error_guard = self.stored_error.lock().unwrap_or_else(PoisonError::into_inner);
        if error_guard.is_none() {
            *error_guard = Some(error);
            self.has_error.store(true, AtomicOrdering::Release);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    fn source_error(path: &str, msg: &str) -> ConcatError {
        SourceClientError::local_read(path, io::Error::other(msg.to_string())).into()
    }

    #[test]
    fn test_first_error_is_kept() {
        let state = ErrorState::new();
        assert!(state.check().is_ok());

        assert!(state.set(source_error("a.txt", "first")));
        assert!(!state.set(source_error("b.txt", "second")));

        assert_eq!(state.check().unwrap_err().to_string(), "a.txt: first");
    }

    #[test]
    fn test_source_error_displays_transparently() {
        let err = source_error("missing.txt", "no such file");
        assert_eq!(err.to_string(), "missing.txt: no such file");
        assert!(err.source_error().is_some());
        assert!(ConcatError::InternalError("x".to_string()).source_error().is_none());
    }
}
