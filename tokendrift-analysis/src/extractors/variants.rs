//! Variant expansion from union-typed props.

use tokendrift_core::types::collections::BTreeMap;
use tokendrift_core::types::component::{ComponentVariant, PropDefinition};

use crate::parsing::balanced::{split_top_level, TYPE_DELIMS};

/// Props whose string-literal unions describe visual variants.
pub(crate) const VARIANT_PROP_NAMES: [&str; 4] = ["variant", "size", "kind", "appearance"];

/// Expand string-literal unions on variant props into named variants.
pub(crate) fn variants_from_props(props: &[PropDefinition]) -> Vec<ComponentVariant> {
    let mut variants = Vec::new();
    for prop in props {
        if !VARIANT_PROP_NAMES.contains(&prop.name.as_str()) {
            continue;
        }
        let Some(type_text) = prop.type_text.as_deref() else { continue };
        for literal in union_string_literals(type_text) {
            let mut values = BTreeMap::new();
            values.insert(prop.name.clone(), literal.clone());
            variants.push(ComponentVariant { name: literal, props: values });
        }
    }
    variants
}

/// Quoted members of a union type (`'sm' | 'md'` → `sm`, `md`).
pub(crate) fn union_string_literals(type_text: &str) -> Vec<String> {
    split_top_level(type_text, '|', TYPE_DELIMS)
        .into_iter()
        .filter_map(|piece| {
            let p = piece.trim();
            let b = p.as_bytes();
            let quoted = b.len() >= 2 && matches!(b[0], b'\'' | b'"') && b[b.len() - 1] == b[0];
            quoted.then(|| p[1..p.len() - 1].to_string())
        })
        .collect()
}
