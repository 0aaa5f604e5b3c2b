//! Scanned UI components and their props, variants, and metadata.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::collections::{BTreeMap, SmallVec4};

/// Component dialect a file was scanned as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    React,
    Svelte,
    Stencil,
    Lit,
    Fast,
    /// Server-side / static-site template languages. Classification only.
    Template,
    /// Design-token source files (JSON token formats, CSS custom properties).
    TokenFile,
}

impl Dialect {
    /// Stable lower-case name used in signal context and reporting.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::React => "react",
            Dialect::Svelte => "svelte",
            Dialect::Stencil => "stencil",
            Dialect::Lit => "lit",
            Dialect::Fast => "fast",
            Dialect::Template => "template",
            Dialect::TokenFile => "token-file",
        }
    }

    /// Whether this dialect is a UI-rendering framework. Template languages
    /// and token files never count toward framework sprawl.
    pub fn is_ui_framework(&self) -> bool {
        matches!(
            self,
            Dialect::React | Dialect::Svelte | Dialect::Stencil | Dialect::Lit | Dialect::Fast
        )
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a component was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSource {
    pub dialect: Dialect,
    pub path: PathBuf,
    /// The exported symbol, when the component is exported under a name.
    pub exported_as: Option<String>,
    /// 1-based line of the defining declaration.
    pub line: u32,
}

/// One declared prop of a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PropDefinition {
    pub name: String,
    /// Declared type as free text (`string`, `'sm' | 'lg'`, …), if known.
    pub type_text: Option<String>,
    pub required: bool,
    /// The default-value expression as written in source, if any.
    pub default_text: Option<String>,
    /// Doc text attached to the prop declaration, if any.
    pub description: Option<String>,
    /// Two-way bindable qualifier (declarative-template dialect).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bindable: bool,
}

/// A named variant with the prop values that produce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentVariant {
    pub name: String,
    pub props: BTreeMap<String, String>,
}

/// A literal style value found inside a component file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardcodedValue {
    /// CSS property the value was assigned to (kebab-case).
    pub property: String,
    pub value: String,
    pub line: u32,
}

/// Free-form component metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ComponentMetadata {
    /// Set when a `@deprecated` doc marker appears in the file.
    pub deprecated: bool,
    /// Set when the component carries a documentation comment.
    pub documented: bool,
    #[serde(default, skip_serializing_if = "SmallVec4::is_empty")]
    pub tags: SmallVec4<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hardcoded_values: Vec<HardcodedValue>,
}

/// A scanned UI component.
///
/// The id is derived from source path + name and is stable across re-scans
/// of unchanged source, so diffing and caching can key on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub name: String,
    pub source: ComponentSource,
    pub props: Vec<PropDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<ComponentVariant>,
    /// Ids of design tokens this component is known to reference.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tokens: Vec<String>,
    /// Names of other components this one renders or imports.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    pub metadata: ComponentMetadata,
    pub scanned_at: u64,
}

impl Component {
    /// Build a component with a derived id and empty collections.
    pub fn new(name: impl Into<String>, source: ComponentSource) -> Self {
        let name = name.into();
        let id = super::identity::component_id(&source.path.to_string_lossy(), &name);
        Self {
            id,
            name,
            source,
            props: Vec::new(),
            variants: Vec::new(),
            tokens: Vec::new(),
            dependencies: Vec::new(),
            metadata: ComponentMetadata::default(),
            scanned_at: super::now_ms(),
        }
    }
}
