//! Extraction errors.

use std::path::PathBuf;

use crate::types::scan::{ScanError, ScanErrorCode};

use super::error_code::{self, TokendriftErrorCode};

/// Errors raised while extracting items from a single file.
///
/// The scan substrate converts these into [`ScanError`] records; they
/// never abort a scan.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse failed: {message}")]
    Parse { message: String },

    #[error("extractor panicked: {message}")]
    Panicked { message: String },

    #[error("extraction timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

impl ExtractError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse { message: message.into() }
    }

    /// Transient failures are retried by the scan substrate. Everything
    /// else fails the file on first occurrence.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::WouldBlock
                    | std::io::ErrorKind::Interrupted
                    | std::io::ErrorKind::TimedOut
            ),
            _ => false,
        }
    }

    /// Code this failure carries when recorded in a `ScanResult`.
    pub fn scan_code(&self) -> ScanErrorCode {
        match self {
            Self::Io(_) => ScanErrorCode::IoError,
            Self::Parse { .. } | Self::Panicked { .. } => ScanErrorCode::ParseError,
            Self::Timeout { .. } => ScanErrorCode::Timeout,
        }
    }

    pub fn to_scan_error(&self, file: impl Into<PathBuf>) -> ScanError {
        ScanError::new(file, self.scan_code(), self.to_string())
    }
}

impl TokendriftErrorCode for ExtractError {
    fn error_code(&self) -> &'static str {
        error_code::EXTRACT_ERROR
    }
}
