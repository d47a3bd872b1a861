//! Receipt domain errors

use thiserror::Error;

use crate::ports::StoreError;

/// Errors that can occur in the receipt domain
///
/// `Validation` is always raised before any persistence write and is fully
/// recoverable by retrying with corrected input. `NotFound` surfaces an
/// unknown receipt id unchanged. `Store` wraps any other persistence
/// failure; the domain performs no silent retries.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Malformed or out-of-range input
    #[error("validation error: {0}")]
    Validation(String),

    /// The requested receipt does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// The persistence collaborator failed
    #[error("store error: {0}")]
    Store(StoreError),
}

impl ReceiptError {
    pub fn validation(message: impl Into<String>) -> Self {
        ReceiptError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ReceiptError::NotFound(message.into())
    }

    /// Returns true if the error is recoverable by correcting the input
    pub fn is_validation(&self) -> bool {
        matches!(self, ReceiptError::Validation(_))
    }

    /// Returns true if the error maps to a missing-resource response
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReceiptError::NotFound(_))
    }
}

/// Store failures keep their not-found identity; everything else is a
/// generic persistence failure.
impl From<StoreError> for ReceiptError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(message) => ReceiptError::NotFound(message),
            other => ReceiptError::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_becomes_domain_not_found() {
        let error: ReceiptError = StoreError::NotFound("receipt 7".to_string()).into();
        assert!(error.is_not_found());
    }

    #[test]
    fn backend_failures_stay_generic() {
        let error: ReceiptError = StoreError::Backend("connection reset".to_string()).into();
        assert!(matches!(error, ReceiptError::Store(_)));
        assert!(!error.is_validation());
    }
}
