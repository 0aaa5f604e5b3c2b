//! Drift signals: classified findings produced by the drift engine.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The category of drift a finding reports.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum DriftKind {
    /// A literal style value where a token exists (or should).
    HardcodedValue,
    /// Two names that appear to denote the same thing.
    Naming,
    /// A component without any documentation.
    Documentation,
    /// A deprecated component still referenced by another.
    DeprecatedUsage,
    /// More than one UI framework detected in the scanned tree.
    FrameworkSprawl,
}

impl DriftKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriftKind::HardcodedValue => "hardcoded-value",
            DriftKind::Naming => "naming",
            DriftKind::Documentation => "documentation",
            DriftKind::DeprecatedUsage => "deprecated-usage",
            DriftKind::FrameworkSprawl => "framework-sprawl",
        }
    }
}

impl std::fmt::Display for DriftKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a drift finding. Declaration order is ascending so the
/// derived `Ord` agrees with `rank()`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Default,
    schemars::JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Critical,
}

impl Severity {
    /// Numeric rank; higher sorts first in reports.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Info => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of entity a finding points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Component,
    Token,
    File,
    /// Whole-tree findings (framework sprawl).
    Project,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Component => "component",
            EntityKind::Token => "token",
            EntityKind::File => "file",
            EntityKind::Project => "project",
        }
    }
}

/// What a drift finding is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftSource {
    pub entity: EntityKind,
    /// Id of the component or token, when the finding targets one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Absent for project-scoped findings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl DriftSource {
    pub fn component(id: impl Into<String>, name: impl Into<String>, path: PathBuf) -> Self {
        Self {
            entity: EntityKind::Component,
            id: Some(id.into()),
            name: name.into(),
            path: Some(path),
            line: None,
        }
    }

    pub fn project(name: impl Into<String>) -> Self {
        Self { entity: EntityKind::Project, id: None, name: name.into(), path: None, line: None }
    }

    pub fn file(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { entity: EntityKind::File, id: None, name, path: Some(path), line: None }
    }

    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}

/// A token the engine suggests as a replacement for a literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSuggestion {
    pub token_id: String,
    pub token_name: String,
    pub token_value: String,
    /// Match confidence in `[0, 1]`.
    pub confidence: f64,
}

/// Supporting detail attached to a finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DriftDetails {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<TokenSuggestion>,
    /// Names of other entities involved (the deprecated target, the
    /// near-duplicate, the sprawling frameworks).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<String>,
}

impl DriftDetails {
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty() && self.related.is_empty()
    }
}

/// One classified drift finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftSignal {
    pub id: String,
    pub kind: DriftKind,
    pub severity: Severity,
    pub source: DriftSource,
    /// Human-readable description of what drifted.
    pub message: String,
    #[serde(default, skip_serializing_if = "DriftDetails::is_empty")]
    pub details: DriftDetails,
    pub detected_at: u64,
}

impl DriftSignal {
    pub fn new(
        kind: DriftKind,
        severity: Severity,
        source: DriftSource,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        let key = format!(
            "{}:{}:{}:{}",
            source.path.as_deref().map(|p| p.to_string_lossy().into_owned()).unwrap_or_default(),
            source.line.unwrap_or(0),
            source.name,
            message,
        );
        let id = super::identity::drift_id(kind.as_str(), source.entity.as_str(), &key);
        Self {
            id,
            kind,
            severity,
            source,
            message,
            details: DriftDetails::default(),
            detected_at: super::now_ms(),
        }
    }

    pub fn with_suggestions(mut self, suggestions: Vec<TokenSuggestion>) -> Self {
        self.details.suggestions = suggestions;
        self
    }

    pub fn with_related(mut self, related: Vec<String>) -> Self {
        self.details.related = related;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str, line: u32) -> DriftSource {
        DriftSource::component("cmp-0", name, PathBuf::from("src/Button.tsx")).at_line(line)
    }

    #[test]
    fn severity_order_matches_rank() {
        assert!(Severity::Critical > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
        assert_eq!(Severity::Critical.rank(), 2);
        assert_eq!(Severity::Info.rank(), 0);
    }

    #[test]
    fn findings_at_distinct_lines_get_distinct_ids() {
        let a = DriftSignal::new(
            DriftKind::HardcodedValue,
            Severity::Warning,
            source("Button", 10),
            "hardcoded color #ff0000",
        );
        let b = DriftSignal::new(
            DriftKind::HardcodedValue,
            Severity::Warning,
            source("Button", 20),
            "hardcoded color #ff0000",
        );
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn project_source_has_no_location() {
        let sprawl = DriftSignal::new(
            DriftKind::FrameworkSprawl,
            Severity::Warning,
            DriftSource::project("frameworks"),
            "multiple UI frameworks detected",
        );
        assert_eq!(sprawl.source.entity, EntityKind::Project);
        assert!(sprawl.source.path.is_none());
    }
}
