//! Dependency extraction: imported components and rendered tags.

use std::sync::LazyLock;

use regex::Regex;
use tokendrift_core::types::collections::FxHashSet;

static IMPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*import\s+(?:type\s+)?([A-Za-z0-9_$*,\s{}]+?)\s+from\s+['"]([^'"]+)['"]"#)
        .expect("import pattern")
});

// Tags must not be preceded by an identifier character, so generic
// arguments (`Array<Item>`) never count as rendered tags.
static CAPITAL_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\w$])<([A-Z][A-Za-z0-9_]*)[\s/>]").expect("capital tag pattern")
});

static ELEMENT_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\w$-])<([a-z][a-z0-9]*(?:-[a-z0-9]+)+)[\s/>]").expect("element tag pattern")
});

/// PascalCase check used for component identifiers.
pub(crate) fn is_component_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_uppercase())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && name.chars().any(|c| c.is_ascii_lowercase())
}

/// Component names imported from relative paths, in order of appearance.
pub(crate) fn relative_import_components(src: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen = FxHashSet::default();
    for caps in IMPORT_LINE.captures_iter(src) {
        if !caps[2].starts_with('.') {
            continue;
        }
        for name in import_clause_names(&caps[1]) {
            if is_component_name(&name) && seen.insert(name.clone()) {
                out.push(name);
            }
        }
    }
    out
}

/// Local names bound by an import clause (`A`, `{ B, C as D }`, `A, { B }`).
/// Namespace imports are skipped.
fn import_clause_names(clause: &str) -> Vec<String> {
    let clause = clause.trim();
    let mut names = Vec::new();
    let (outside, inside) = match (clause.find('{'), clause.rfind('}')) {
        (Some(open), Some(close)) if close > open => (
            format!("{} {}", &clause[..open], &clause[close + 1..]),
            Some(&clause[open + 1..close]),
        ),
        _ => (clause.to_string(), None),
    };
    for piece in outside.split(',') {
        let p = piece.trim();
        if !p.is_empty() && !p.contains('*') {
            names.push(p.to_string());
        }
    }
    if let Some(inside) = inside {
        for piece in inside.split(',') {
            let p = piece.trim().trim_start_matches("type ").trim();
            if p.is_empty() {
                continue;
            }
            let local = p.rsplit(" as ").next().unwrap_or(p).trim();
            names.push(local.to_string());
        }
    }
    names
}

/// Capitalized tags rendered in `region`, with match offsets.
pub(crate) fn capital_tag_occurrences(region: &str) -> Vec<(String, usize)> {
    CAPITAL_TAG
        .captures_iter(region)
        .filter_map(|caps| {
            let m = caps.get(1)?;
            is_component_name(m.as_str()).then(|| (m.as_str().to_string(), m.start()))
        })
        .collect()
}

/// Kebab-case custom-element tags (`<my-button>`) in `region`, with the
/// byte offset of each occurrence.
pub(crate) fn custom_element_tag_occurrences(region: &str) -> Vec<(String, usize)> {
    ELEMENT_TAG
        .captures_iter(region)
        .filter_map(|caps| caps.get(1).map(|m| (m.as_str().to_string(), m.start())))
        .collect()
}

/// Component names composed into a class extends clause, covering both
/// a plain base class and mixin calls like `Mixin(Base)`.
pub(crate) fn heritage_dependencies(heritage: &str) -> Vec<String> {
    let Some(extends_at) = heritage.find("extends") else { return Vec::new() };
    let expr = &heritage[extends_at + "extends".len()..];
    let expr = match expr.find("implements") {
        Some(i) => &expr[..i],
        None => expr,
    };
    let mut deps: Vec<String> = Vec::new();
    for word in expr.split(|c: char| !c.is_ascii_alphanumeric() && c != '_' && c != '$') {
        if is_component_name(word) && !deps.iter().any(|d| d == word) {
            deps.push(word.to_string());
        }
    }
    deps
}

/// Whether the file imports from the named package (or a subpath of it).
pub(crate) fn imports_package(src: &str, package: &str) -> bool {
    IMPORT_LINE.captures_iter(src).any(|caps| {
        let path = &caps[2];
        path == package || path.strip_prefix(package).is_some_and(|rest| rest.starts_with('/'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_imports_collect_component_names() {
        let src = "import Button from './Button';\nimport { Icon, Text as AppText } from '../ui';\nimport React from 'react';\nimport * as utils from './utils';\n";
        assert_eq!(relative_import_components(src), vec!["Button", "Icon", "AppText"]);
    }

    #[test]
    fn capital_tags_ignore_generics_and_closers() {
        let src = "const x: Array<Item> = [];\nreturn (<Card title=\"hi\"><Badge/></Card>);";
        let names: Vec<String> =
            capital_tag_occurrences(src).into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Card", "Badge"]);
    }

    #[test]
    fn screaming_case_is_not_a_component() {
        assert!(!is_component_name("CONSTANT"));
        assert!(is_component_name("TabGroup"));
    }

    #[test]
    fn custom_element_tags_need_a_hyphen() {
        let src = "<div><my-button size=\"sm\"></my-button><span>x</span></div>";
        let names: Vec<String> =
            custom_element_tag_occurrences(src).into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["my-button"]);
    }

    #[test]
    fn package_imports_match_subpaths() {
        let src = "import { Button } from '@acme/design-system/button';\n";
        assert!(imports_package(src, "@acme/design-system"));
        assert!(!imports_package(src, "@acme/design"));
    }

    #[test]
    fn heritage_names_cover_mixin_calls() {
        assert_eq!(
            heritage_dependencies(" extends FocusTrap(ThemedBase) implements Lifecycle "),
            vec!["FocusTrap", "ThemedBase"]
        );
        assert_eq!(heritage_dependencies(" extends LitElement "), vec!["LitElement"]);
        assert!(heritage_dependencies("  ").is_empty());
    }
}
