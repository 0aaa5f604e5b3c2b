//! Token comparison errors.

use super::error_code::{self, TokendriftErrorCode};

/// Errors raised by the token comparison API.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error("Invalid {name} threshold {value}: must be between 0.0 and 1.0")]
    InvalidThreshold { name: &'static str, value: f64 },

    /// A token value that no extractor should ever produce (empty hex,
    /// non-finite spacing). Comparing such a value would silently skew
    /// every downstream count, so it fails instead.
    #[error("Malformed value on token `{token}`: {detail}")]
    MalformedValue { token: String, detail: String },
}

impl TokendriftErrorCode for CompareError {
    fn error_code(&self) -> &'static str {
        error_code::COMPARE_ERROR
    }
}
