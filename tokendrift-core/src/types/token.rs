//! Design tokens as declared by token source files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::collections::SmallVec2;

/// Category a token belongs to, inferred from its name and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenCategory {
    Color,
    Spacing,
    Typography,
    Border,
    Shadow,
    Other,
}

impl TokenCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenCategory::Color => "color",
            TokenCategory::Spacing => "spacing",
            TokenCategory::Typography => "typography",
            TokenCategory::Border => "border",
            TokenCategory::Shadow => "shadow",
            TokenCategory::Other => "other",
        }
    }
}

/// Normalized token value.
///
/// Colors normalize to lowercase six-digit hex. Spacing keeps the declared
/// unit alongside the numeric value. Anything unrecognized stays raw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TokenValue {
    Color { hex: String },
    Spacing { value: f64, unit: String },
    Raw { text: String },
}

impl TokenValue {
    /// Canonical fingerprint for value-equality matching. Spacing converts
    /// to pixels first so `1rem` and `16px` fingerprint identically.
    pub fn fingerprint(&self) -> String {
        match self {
            TokenValue::Color { hex } => format!("color:{hex}"),
            TokenValue::Spacing { value, unit } => {
                let px = match unit.as_str() {
                    "rem" | "em" => value * crate::constants::REM_BASE_PX,
                    _ => *value,
                };
                format!("spacing:{px}")
            }
            TokenValue::Raw { text } => format!("raw:{}", text.to_lowercase()),
        }
    }
}

impl std::fmt::Display for TokenValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenValue::Color { hex } => f.write_str(hex),
            TokenValue::Spacing { value, unit } => write!(f, "{value}{unit}"),
            TokenValue::Raw { text } => f.write_str(text),
        }
    }
}

/// Where a token was declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSource {
    pub path: PathBuf,
    pub line: u32,
    /// Declaration format: `"json"`, `"css"`, or `"scss"`.
    pub format: String,
}

/// A design token (name, value, provenance).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignToken {
    pub id: String,
    /// Name as declared (`--color-primary`, `spacing.md`, `$brand-blue`).
    pub name: String,
    pub category: TokenCategory,
    pub value: TokenValue,
    /// The value exactly as written in source.
    pub raw_value: String,
    pub source: TokenSource,
    /// Other names that resolve to this token.
    #[serde(default, skip_serializing_if = "SmallVec2::is_empty")]
    pub aliases: SmallVec2<String>,
    /// Component ids observed referencing this token.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub used_by: Vec<String>,
    pub scanned_at: u64,
}

impl DesignToken {
    pub fn new(
        name: impl Into<String>,
        category: TokenCategory,
        value: TokenValue,
        raw_value: impl Into<String>,
        source: TokenSource,
    ) -> Self {
        let name = name.into();
        let id = super::identity::token_id(&source.path.to_string_lossy(), &name);
        Self {
            id,
            name,
            category,
            value,
            raw_value: raw_value.into(),
            source,
            aliases: SmallVec2::new(),
            used_by: Vec::new(),
            scanned_at: super::now_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_fingerprint_normalizes_rem_to_px() {
        let rem = TokenValue::Spacing { value: 1.0, unit: "rem".into() };
        let px = TokenValue::Spacing { value: 16.0, unit: "px".into() };
        assert_eq!(rem.fingerprint(), px.fingerprint());
    }

    #[test]
    fn raw_fingerprint_case_insensitive() {
        let a = TokenValue::Raw { text: "Inter, sans-serif".into() };
        let b = TokenValue::Raw { text: "inter, sans-serif".into() };
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn color_fingerprint_distinct_from_raw() {
        let color = TokenValue::Color { hex: "#ff0000".into() };
        let raw = TokenValue::Raw { text: "#ff0000".into() };
        assert_ne!(color.fingerprint(), raw.fingerprint());
    }
}
