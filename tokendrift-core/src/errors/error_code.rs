//! Stable error codes for programmatic matching across process
//! boundaries (logs, JSON reports, exit summaries).

/// Configuration could not be loaded or validated.
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
/// A file's content could not be extracted.
pub const EXTRACT_ERROR: &str = "EXTRACT_ERROR";
/// Token comparison was given unusable input.
pub const COMPARE_ERROR: &str = "COMPARE_ERROR";
/// Operation was cancelled before completion.
pub const CANCELLED: &str = "CANCELLED";

/// Every tokendrift error maps to a stable code.
pub trait TokendriftErrorCode {
    fn error_code(&self) -> &'static str;
}
