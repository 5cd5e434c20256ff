//! Error taxonomy for the scoring core and the record store seam.
//!
//! `StoreError` is defined in `cbat-core` so callers of the `RecordStore`
//! trait can classify persistence failures without string matching.

use thiserror::Error;

/// Errors surfaced by the scoring core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The target roll number is absent from the record set. User-visible
    /// and not fatal; callers surface a "not found" message.
    #[error("no record for roll number {roll_no}")]
    NotFound { roll_no: String },

    /// A submission carried non-numeric, missing, or out-of-range values.
    /// Nothing is written when this is raised.
    #[error("malformed submission: {0}")]
    MalformedInput(String),
}

impl CoreError {
    /// Returns `true` for the user-visible "not found" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound { .. })
    }
}

/// Errors from `RecordStore` implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying file or directory could not be read or written.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted data could not be decoded.
    #[error("store data corrupt: {0}")]
    Corrupt(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_classification() {
        let err = CoreError::NotFound {
            roll_no: "R42".into(),
        };
        assert!(err.is_not_found());
        assert!(err.to_string().contains("R42"));
        assert!(!CoreError::MalformedInput("bad".into()).is_not_found());
    }

    #[test]
    fn store_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StoreError = io.into();
        assert!(err.to_string().contains("denied"));
    }
}
