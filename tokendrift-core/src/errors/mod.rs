//! Error handling for tokendrift.
//! One `thiserror` enum per subsystem.
//!
//! Per-file scan failures are NOT errors in this sense: they become
//! [`crate::types::ScanError`] records inside a `ScanResult`. The enums
//! here cover the failures that abort an operation outright.

pub mod compare_error;
pub mod config_error;
pub mod error_code;
pub mod extract_error;

pub use compare_error::CompareError;
pub use config_error::ConfigError;
pub use error_code::TokendriftErrorCode;
pub use extract_error::ExtractError;
