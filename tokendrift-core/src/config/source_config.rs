//! Per-source scan target configuration.

use serde::{Deserialize, Serialize};

use crate::types::collections::BTreeMap;
use crate::types::component::Dialect;

/// One scan source: a dialect plus the globs that select its files.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default)]
pub struct SourceConfig {
    /// Dialect this source is scanned as.
    pub kind: Dialect,
    /// Include globs relative to the project root. Empty = per-kind defaults.
    pub include: Vec<String>,
    /// Exclude globs merged with the built-in default excludes.
    pub exclude: Vec<String>,
    /// Package name of the first-party design system. Components importing
    /// from it are tagged `design-system`.
    pub design_system_package: Option<String>,
    /// Disabled sources are skipped by the orchestrator. Default: true.
    pub enabled: Option<bool>,
    /// Dialect-specific flags (web-component base class, template engine
    /// allowlist).
    pub flags: BTreeMap<String, String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::new(Dialect::React)
    }
}

impl SourceConfig {
    pub fn new(kind: Dialect) -> Self {
        Self {
            kind,
            include: Vec::new(),
            exclude: Vec::new(),
            design_system_package: None,
            enabled: None,
            flags: BTreeMap::new(),
        }
    }

    pub fn with_include(mut self, patterns: &[&str]) -> Self {
        self.include = patterns.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Returns whether this source participates in scans, defaulting to true.
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// Include globs to use: the configured ones, or the dialect defaults
    /// when none are configured.
    pub fn effective_include(&self) -> Vec<String> {
        if self.include.is_empty() {
            default_includes(self.kind).iter().map(|s| s.to_string()).collect()
        } else {
            self.include.clone()
        }
    }
}

/// Built-in include globs per dialect.
pub fn default_includes(kind: Dialect) -> &'static [&'static str] {
    match kind {
        Dialect::React => &["**/*.tsx", "**/*.jsx"],
        Dialect::Svelte => &["**/*.svelte"],
        Dialect::Stencil => &["**/*.tsx"],
        Dialect::Lit => &["**/*.ts", "**/*.js"],
        Dialect::Fast => &["**/*.ts"],
        Dialect::Template => TEMPLATE_INCLUDES,
        Dialect::TokenFile => &[
            "**/*tokens*.json",
            "**/*theme*.json",
            "**/tokens/**/*.json",
            "**/*.css",
            "**/*.scss",
        ],
    }
}

/// Server-side and static-site template extensions the template scanner
/// classifies. Matching is by extension only.
pub const TEMPLATE_INCLUDES: &[&str] = &[
    "**/*.erb",
    "**/*.haml",
    "**/*.slim",
    "**/*.twig",
    "**/*.blade.php",
    "**/*.liquid",
    "**/*.njk",
    "**/*.nunjucks",
    "**/*.hbs",
    "**/*.handlebars",
    "**/*.mustache",
    "**/*.ejs",
    "**/*.pug",
    "**/*.jade",
    "**/*.jinja",
    "**/*.jinja2",
    "**/*.j2",
    "**/*.ftl",
    "**/*.vm",
    "**/*.tpl",
    "**/*.dust",
    "**/*.marko",
    "**/*.eta",
    "**/*.phtml",
    "**/*.cshtml",
    "**/*.razor",
    "**/*.erb.html",
    "**/*.html.erb",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_include_falls_back_to_dialect_defaults() {
        let source = SourceConfig::new(Dialect::Svelte);
        assert_eq!(source.effective_include(), vec!["**/*.svelte".to_string()]);
    }

    #[test]
    fn explicit_include_wins_over_defaults() {
        let source = SourceConfig::new(Dialect::React).with_include(&["app/**/*.tsx"]);
        assert_eq!(source.effective_include(), vec!["app/**/*.tsx".to_string()]);
    }

    #[test]
    fn sources_default_to_enabled() {
        assert!(SourceConfig::new(Dialect::Lit).effective_enabled());
    }
}
