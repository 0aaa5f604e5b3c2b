//! Configuration system for tokendrift.
//! TOML-based, layered resolution: env > project > defaults.

pub mod drift_config;
pub mod scan_config;
pub mod source_config;
pub mod tokendrift_config;

pub use drift_config::DriftConfig;
pub use scan_config::ScanConfig;
pub use source_config::{default_includes, SourceConfig, TEMPLATE_INCLUDES};
pub use tokendrift_config::TokendriftConfig;

/// Generate a JSON Schema for the configuration file.
///
/// Editors and CI can validate `tokendrift.toml` against this.
pub fn generate_json_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(TokendriftConfig)
}
