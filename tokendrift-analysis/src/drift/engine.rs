//! DriftAnalyzer: runs every enabled check over one scan's output and
//! applies configured severity overrides to the findings.

use tokendrift_core::config::DriftConfig;
use tokendrift_core::types::component::Component;
use tokendrift_core::types::drift::DriftSignal;
use tokendrift_core::types::signal::RawSignal;
use tokendrift_core::types::token::DesignToken;

use super::{deprecated, documentation, hardcoded, naming, sprawl};

/// Drift detection over scanned components, the token library, raw
/// signals, and the detected-framework list.
pub struct DriftAnalyzer {
    config: DriftConfig,
}

impl DriftAnalyzer {
    pub fn new(config: DriftConfig) -> Self {
        Self { config }
    }

    /// Run every enabled check. Findings come back in check order:
    /// hardcoded, deprecated-usage, naming, documentation, sprawl.
    pub fn analyze(
        &self,
        components: &[Component],
        tokens: &[DesignToken],
        signals: &[RawSignal],
        frameworks: &[String],
    ) -> Vec<DriftSignal> {
        let mut drifts = Vec::new();
        if self.config.effective_check_hardcoded() {
            let min_confidence = self.config.effective_min_suggestion_confidence();
            let cap = self.config.effective_max_suggestions();
            for component in components {
                drifts.extend(hardcoded::check_component(component, tokens, min_confidence, cap));
            }
            drifts.extend(hardcoded::check_signals(signals, tokens, min_confidence, cap));
        }
        if self.config.effective_check_deprecated() {
            drifts.extend(deprecated::check(components));
        }
        if self.config.effective_check_naming() {
            drifts.extend(naming::check(components));
        }
        if self.config.effective_check_documentation() {
            drifts.extend(components.iter().filter_map(documentation::check));
        }
        if self.config.effective_check_sprawl() {
            drifts.extend(sprawl::check_framework_sprawl(frameworks));
        }
        for drift in &mut drifts {
            drift.severity = self.config.severity_for(drift.kind, drift.severity);
        }
        tracing::debug!(findings = drifts.len(), "drift analysis complete");
        drifts
    }
}

impl Default for DriftAnalyzer {
    fn default() -> Self {
        Self::new(DriftConfig::default())
    }
}

/// Sort findings for display: highest severity first, input order kept
/// within each severity.
pub fn rank_drifts(drifts: &mut [DriftSignal]) {
    drifts.sort_by_key(|d| std::cmp::Reverse(d.severity.rank()));
}
