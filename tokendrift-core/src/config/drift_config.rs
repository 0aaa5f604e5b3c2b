//! Drift engine configuration.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::types::collections::BTreeMap;
use crate::types::drift::{DriftKind, Severity};

/// Configuration for the drift checks and suggestion lookup.
#[derive(Debug, Clone, Serialize, Deserialize, Default, schemars::JsonSchema)]
#[serde(default)]
pub struct DriftConfig {
    /// Run the hardcoded-value check. Default: true.
    pub check_hardcoded: Option<bool>,
    /// Run the deprecated-usage check. Default: true.
    pub check_deprecated: Option<bool>,
    /// Run the naming check. Default: true.
    pub check_naming: Option<bool>,
    /// Run the documentation check. Default: true.
    pub check_documentation: Option<bool>,
    /// Run the framework-sprawl check. Default: true.
    pub check_sprawl: Option<bool>,
    /// Per-kind severity overrides, raising or lowering the fixed defaults.
    pub severity_overrides: BTreeMap<DriftKind, Severity>,
    /// Minimum confidence for a token suggestion. Default: 0.75.
    pub min_suggestion_confidence: Option<f64>,
    /// Maximum suggestions attached per finding. Default: 3.
    pub max_suggestions: Option<usize>,
}

impl DriftConfig {
    pub fn effective_check_hardcoded(&self) -> bool {
        self.check_hardcoded.unwrap_or(true)
    }

    pub fn effective_check_deprecated(&self) -> bool {
        self.check_deprecated.unwrap_or(true)
    }

    pub fn effective_check_naming(&self) -> bool {
        self.check_naming.unwrap_or(true)
    }

    pub fn effective_check_documentation(&self) -> bool {
        self.check_documentation.unwrap_or(true)
    }

    pub fn effective_check_sprawl(&self) -> bool {
        self.check_sprawl.unwrap_or(true)
    }

    /// Returns the effective minimum suggestion confidence, defaulting to 0.75.
    pub fn effective_min_suggestion_confidence(&self) -> f64 {
        self.min_suggestion_confidence.unwrap_or(constants::DEFAULT_MIN_SUGGESTION_CONFIDENCE)
    }

    /// Returns the effective suggestion cap, defaulting to 3.
    pub fn effective_max_suggestions(&self) -> usize {
        self.max_suggestions.unwrap_or(constants::DEFAULT_MAX_SUGGESTIONS)
    }

    /// Severity for a drift kind: the override when present, otherwise the
    /// supplied per-check default.
    pub fn severity_for(&self, kind: DriftKind, default: Severity) -> Severity {
        self.severity_overrides.get(&kind).copied().unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_check_defaults() {
        let mut config = DriftConfig::default();
        config.severity_overrides.insert(DriftKind::Naming, Severity::Critical);

        assert_eq!(config.severity_for(DriftKind::Naming, Severity::Warning), Severity::Critical);
        assert_eq!(
            config.severity_for(DriftKind::Documentation, Severity::Info),
            Severity::Info,
        );
    }

    #[test]
    fn overrides_deserialize_from_kebab_case_keys() {
        let config: DriftConfig = toml::from_str(
            r#"
            [severity_overrides]
            "hardcoded-value" = "critical"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.severity_for(DriftKind::HardcodedValue, Severity::Warning),
            Severity::Critical,
        );
    }
}
