//! # tokendrift-core
//!
//! Foundation crate for the tokendrift design-system scanner.
//! Defines the shared data model (components, tokens, signals, drift
//! findings, scan results), configuration, errors, events, and tracing.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::TokendriftConfig;
pub use errors::error_code::TokendriftErrorCode;
pub use events::handler::ScanEventHandler;
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::compare::TokenComparisonResult;
pub use types::component::{Component, Dialect, PropDefinition};
pub use types::drift::{DriftKind, DriftSignal, Severity};
pub use types::scan::{ScanError, ScanResult, ScanWarning};
pub use types::signal::{RawSignal, SignalKind};
pub use types::token::{DesignToken, TokenCategory, TokenValue};
