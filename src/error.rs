//! Error types
//!
//! Every fallible operation of the crate returns [`TransportResult`]. Errors
//! are fatal to the call that raised them: the solver never returns a partial
//! field and never retries.

use thiserror::Error;

/// Errors raised by the solver core and its collaborators
#[derive(Debug, Error)]
pub enum TransportError {
    /// A supplied array does not have the length the call requires
    #[error("dimension mismatch: {quantity} has length {found}, expected {expected}")]
    DimensionMismatch {
        quantity: &'static str,
        expected: usize,
        found: usize,
    },

    /// Non-positive or non-finite step sizes, reversed ranges, zero time steps
    #[error("invalid grid configuration: {0}")]
    InvalidGridConfiguration(String),

    /// A physical parameter outside its admissible range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The upwind coupling only holds for u >= 0
    #[error("negative velocity {value} at {location}: the upwind scheme requires u >= 0")]
    NegativeVelocity { value: f64, location: String },

    /// A computed concentration is NaN or infinite
    #[error("non-finite concentration at step {step}, node {node}")]
    NonFinite { step: usize, node: usize },

    /// Unusable file or configuration content
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("plotting error: {0}")]
    Plot(String),
}

/// Result alias used throughout the crate
pub type TransportResult<T> = Result<T, TransportError>;

impl TransportError {
    /// Wrap any displayable plotting backend error
    pub(crate) fn plot(error: impl std::fmt::Display) -> Self {
        Self::Plot(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_message() {
        let error = TransportError::DimensionMismatch {
            quantity: "per-node velocity",
            expected: 5,
            found: 4,
        };
        assert_eq!(
            error.to_string(),
            "dimension mismatch: per-node velocity has length 4, expected 5"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: TransportError = io.into();
        assert!(matches!(error, TransportError::Io(_)));
    }
}
