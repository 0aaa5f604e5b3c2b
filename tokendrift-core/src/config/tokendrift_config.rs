//! Top-level tokendrift configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DriftConfig, ScanConfig, SourceConfig};
use crate::constants;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`TOKENDRIFT_*`)
/// 2. Project config (`tokendrift.toml` in project root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, schemars::JsonSchema)]
#[serde(default)]
pub struct TokendriftConfig {
    pub scan: ScanConfig,
    pub drift: DriftConfig,
    /// Scan sources. Empty means the orchestrator caller supplies them.
    pub sources: Vec<SourceConfig>,
}

impl TokendriftConfig {
    /// Load configuration with layered resolution, then validate.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join("tokendrift.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &TokendriftConfig) -> Result<(), ConfigError> {
        if let Some(concurrency) = config.scan.concurrency {
            if concurrency == 0 || concurrency > constants::MAX_CONCURRENCY {
                return Err(ConfigError::ValidationFailed {
                    field: "scan.concurrency".to_string(),
                    message: format!("must be between 1 and {}", constants::MAX_CONCURRENCY),
                });
            }
        }
        if let Some(timeout) = config.scan.file_timeout_ms {
            if timeout == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "scan.file_timeout_ms".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(threshold) = config.scan.large_file_count {
            if threshold == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "scan.large_file_count".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(confidence) = config.drift.min_suggestion_confidence {
            if !(0.0..=1.0).contains(&confidence) {
                return Err(ConfigError::ValidationFailed {
                    field: "drift.min_suggestion_confidence".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut TokendriftConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: TokendriftConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base`
    /// values only when `other` has a `Some` (or non-empty) value.
    fn merge(base: &mut TokendriftConfig, other: &TokendriftConfig) {
        // Scan
        if other.scan.concurrency.is_some() {
            base.scan.concurrency = other.scan.concurrency;
        }
        if other.scan.file_timeout_ms.is_some() {
            base.scan.file_timeout_ms = other.scan.file_timeout_ms;
        }
        if other.scan.max_retries.is_some() {
            base.scan.max_retries = other.scan.max_retries;
        }
        if other.scan.retry_delay_ms.is_some() {
            base.scan.retry_delay_ms = other.scan.retry_delay_ms;
        }
        if other.scan.cache_capacity.is_some() {
            base.scan.cache_capacity = other.scan.cache_capacity;
        }
        if other.scan.large_file_count.is_some() {
            base.scan.large_file_count = other.scan.large_file_count;
        }
        if other.scan.follow_symlinks.is_some() {
            base.scan.follow_symlinks = other.scan.follow_symlinks;
        }

        // Drift
        if other.drift.check_hardcoded.is_some() {
            base.drift.check_hardcoded = other.drift.check_hardcoded;
        }
        if other.drift.check_deprecated.is_some() {
            base.drift.check_deprecated = other.drift.check_deprecated;
        }
        if other.drift.check_naming.is_some() {
            base.drift.check_naming = other.drift.check_naming;
        }
        if other.drift.check_documentation.is_some() {
            base.drift.check_documentation = other.drift.check_documentation;
        }
        if other.drift.check_sprawl.is_some() {
            base.drift.check_sprawl = other.drift.check_sprawl;
        }
        if !other.drift.severity_overrides.is_empty() {
            base.drift.severity_overrides = other.drift.severity_overrides.clone();
        }
        if other.drift.min_suggestion_confidence.is_some() {
            base.drift.min_suggestion_confidence = other.drift.min_suggestion_confidence;
        }
        if other.drift.max_suggestions.is_some() {
            base.drift.max_suggestions = other.drift.max_suggestions;
        }

        // Sources replace wholesale; per-source merging would be ambiguous.
        if !other.sources.is_empty() {
            base.sources = other.sources.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `TOKENDRIFT_SCAN_CONCURRENCY`, `TOKENDRIFT_DRIFT_MAX_SUGGESTIONS`, etc.
    fn apply_env_overrides(config: &mut TokendriftConfig) {
        if let Ok(val) = std::env::var("TOKENDRIFT_SCAN_CONCURRENCY") {
            if let Ok(v) = val.parse::<usize>() {
                config.scan.concurrency = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TOKENDRIFT_SCAN_FILE_TIMEOUT_MS") {
            if let Ok(v) = val.parse::<u64>() {
                config.scan.file_timeout_ms = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TOKENDRIFT_SCAN_MAX_RETRIES") {
            if let Ok(v) = val.parse::<u32>() {
                config.scan.max_retries = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TOKENDRIFT_SCAN_CACHE_CAPACITY") {
            if let Ok(v) = val.parse::<u64>() {
                config.scan.cache_capacity = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TOKENDRIFT_SCAN_LARGE_FILE_COUNT") {
            if let Ok(v) = val.parse::<usize>() {
                config.scan.large_file_count = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TOKENDRIFT_DRIFT_MIN_SUGGESTION_CONFIDENCE") {
            if let Ok(v) = val.parse::<f64>() {
                config.drift.min_suggestion_confidence = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TOKENDRIFT_DRIFT_MAX_SUGGESTIONS") {
            if let Ok(v) = val.parse::<usize>() {
                config.drift.max_suggestions = Some(v);
            }
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
