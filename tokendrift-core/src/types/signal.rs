//! Raw signals: positional observations emitted by extractors before
//! any cross-file analysis runs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::collections::BTreeMap;
use super::component::Dialect;

/// What kind of observation a signal records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalKind {
    ColorValue,
    SpacingValue,
    FontSize,
    FontFamily,
    FontWeight,
    ComponentDef,
    ComponentUsage,
    TokenDefinition,
    TokenUsage,
    ClassPattern,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::ColorValue => "color-value",
            SignalKind::SpacingValue => "spacing-value",
            SignalKind::FontSize => "font-size",
            SignalKind::FontFamily => "font-family",
            SignalKind::FontWeight => "font-weight",
            SignalKind::ComponentDef => "component-def",
            SignalKind::ComponentUsage => "component-usage",
            SignalKind::TokenDefinition => "token-definition",
            SignalKind::TokenUsage => "token-usage",
            SignalKind::ClassPattern => "class-pattern",
        }
    }
}

/// Lexical scope a signal was observed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SignalScope {
    /// Top-level stylesheet or `:root` block.
    #[default]
    Global,
    /// Inside a component's style block or styled declaration.
    Component,
    /// Inline style attribute or style prop.
    Inline,
}

/// Context captured alongside a signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalContext {
    pub dialect: Dialect,
    /// Framework name when the dialect implies one (`"react"`, `"lit"`, …).
    pub framework: Option<String>,
    pub scope: SignalScope,
    /// True when the value already references a token (`var(--x)`, theme path).
    pub tokenized: bool,
}

impl SignalContext {
    pub fn for_dialect(dialect: Dialect) -> Self {
        let framework = dialect.is_ui_framework().then(|| dialect.as_str().to_string());
        Self { dialect, framework, scope: SignalScope::Global, tokenized: false }
    }

    pub fn scoped(mut self, scope: SignalScope) -> Self {
        self.scope = scope;
        self
    }
}

/// One positional observation in one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSignal {
    pub id: String,
    pub kind: SignalKind,
    /// The observed text, trimmed but otherwise as written.
    pub value: String,
    pub file: PathBuf,
    /// 1-based line.
    pub line: u32,
    /// 1-based column of the value start.
    pub column: u32,
    pub context: SignalContext,
    /// Extractor-specific detail (CSS property, matched selector, …).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl RawSignal {
    pub fn new(
        kind: SignalKind,
        value: impl Into<String>,
        file: impl Into<PathBuf>,
        line: u32,
        column: u32,
        context: SignalContext,
    ) -> Self {
        let value = value.into();
        let file = file.into();
        let id = super::identity::signal_id(kind.as_str(), &file.to_string_lossy(), line, &value);
        Self { id, kind, value, file, line, column, context, metadata: BTreeMap::new() }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
