//! Svelte single-file component extraction.
//!
//! One component per `.svelte` file, named from the filename. Props come
//! from legacy `export let` declarations or from the runes
//! `let { … } = $props()` destructuring, with type backfill from the
//! annotated props type. `<style>` blocks, inline `style=` attributes
//! and `style:` directives feed hardcoded-value extraction.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tokendrift_core::errors::ExtractError;
use tokendrift_core::types::component::{Component, ComponentSource, Dialect, PropDefinition};
use tokendrift_core::types::signal::{SignalContext, SignalScope};

use crate::parsing::balanced::{
    extract_balanced, matching_close, read_until_unnested, CODE_DELIMS, TYPE_DELIMS,
};
use crate::parsing::comments::{contains_deprecated, doc_block_above, line_of_offset};
use crate::parsing::naming::component_name_from_path;
use crate::parsing::props::{find_type_body, parse_destructured_props, parse_type_fields};
use crate::signals::SignalCollector;

use super::dependencies::{capital_tag_occurrences, imports_package, relative_import_components};
use super::fields::{merge_type_fields, prop_from_parsed};
use super::style_values::{css_declarations, inline_style_entries, var_references, StyleSink};
use super::traits::{FileExtractor, FileOutput};
use super::variants::variants_from_props;

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script([^>]*)>(.*?)</script>").expect("script pattern"));

static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*>(.*?)</style>").expect("style pattern"));

static STYLE_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"style\s*=\s*"([^"]*)""#).expect("style attr pattern"));

static STYLE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"style:([A-Za-z-]+)\s*=\s*(?:"([^"]*)"|\{([^}]*)\})"#)
        .expect("style directive pattern")
});

static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("html comment pattern"));

static EXPORT_LET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+let\s+([A-Za-z_$][\w$]*)").expect("export let pattern")
});

/// Extracts the single component a `.svelte` file defines.
pub struct SvelteExtractor {
    design_system_package: Option<String>,
}

impl SvelteExtractor {
    pub fn new() -> Self {
        Self { design_system_package: None }
    }

    /// Components importing from `package` get tagged `design-system`.
    pub fn with_design_system(mut self, package: impl Into<String>) -> Self {
        self.design_system_package = Some(package.into());
        self
    }
}

impl Default for SvelteExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FileExtractor for SvelteExtractor {
    type Item = Component;

    fn name(&self) -> &'static str {
        "svelte"
    }

    fn extract(&self, path: &Path, source: &str) -> Result<FileOutput<Component>, ExtractError> {
        // SvelteKit route files (+page.svelte, +layout.svelte, …) are
        // application glue, not reusable components.
        if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('+'))
        {
            return Ok(FileOutput::default());
        }

        let name = component_name_from_path(path);
        let mut collector = SignalCollector::new(path, SignalContext::for_dialect(Dialect::Svelte));
        let mut sink = StyleSink::new();

        // <style> blocks are compiler-scoped to the component.
        collector.set_scope(SignalScope::Component);
        for caps in STYLE_BLOCK.captures_iter(source) {
            let Some(body) = caps.get(1) else { continue };
            for (prop, value, line) in css_declarations(source, body.as_str()) {
                sink.record(&prop, value, line);
                collector.collect_from_value(&prop, value, line);
                for token in var_references(value) {
                    collector.collect_token_usage(token, line);
                }
            }
        }

        collector.set_scope(SignalScope::Inline);
        for caps in STYLE_ATTR.captures_iter(source) {
            let Some(attr) = caps.get(1) else { continue };
            let line = line_of_offset(source, attr.start());
            for (prop, value) in inline_style_entries(attr.as_str()) {
                sink.record(&prop, &value, line);
                collector.collect_from_value(&prop, &value, line);
                for token in var_references(&value) {
                    collector.collect_token_usage(token, line);
                }
            }
        }
        for caps in STYLE_DIRECTIVE.captures_iter(source) {
            let Some(prop) = caps.get(1) else { continue };
            let value = caps
                .get(2)
                .map(|m| m.as_str().to_string())
                .or_else(|| caps.get(3).and_then(|m| literal_expression(m.as_str())));
            let Some(value) = value else { continue };
            let line = line_of_offset(source, prop.start());
            sink.record(prop.as_str(), &value, line);
            collector.collect_from_value(prop.as_str(), &value, line);
            for token in var_references(&value) {
                collector.collect_token_usage(token, line);
            }
        }
        collector.set_scope(SignalScope::Global);

        let script = instance_script(source);
        let props = match script {
            Some(body) => extract_props(source, body),
            None => Vec::new(),
        };

        let imports = relative_import_components(source);
        let tag_uses = capital_tag_occurrences(source);
        for (tag, at) in &tag_uses {
            collector.collect_component_usage(tag, line_of_offset(source, *at));
        }
        let mut deps: Vec<String> = imports.into_iter().filter(|n| *n != name).collect();
        for (tag, _) in tag_uses {
            if tag != name && !deps.contains(&tag) {
                deps.push(tag);
            }
        }

        let mut component = Component::new(
            name.clone(),
            ComponentSource {
                dialect: Dialect::Svelte,
                path: path.to_path_buf(),
                exported_as: Some(name.clone()),
                line: 1,
            },
        );
        component.variants = variants_from_props(&props);
        component.props = props;
        component.dependencies = deps;
        component.metadata.documented = HTML_COMMENT
            .find_iter(source)
            .any(|m| m.as_str().contains("@component"))
            || script.is_some_and(|s| s.trim_start().starts_with("/**"));
        component.metadata.deprecated = HTML_COMMENT
            .find_iter(source)
            .any(|m| contains_deprecated(m.as_str()))
            || script.is_some_and(head_comment_deprecated);
        if self
            .design_system_package
            .as_deref()
            .is_some_and(|pkg| imports_package(source, pkg))
        {
            component.metadata.tags.push("design-system".into());
        }
        component.metadata.hardcoded_values = sink.finish();

        collector.collect_component_def(&name, 1);
        Ok(FileOutput::new(vec![component], collector.into_signals()))
    }
}

/// Body of the instance `<script>` block, skipping module scripts
/// (`context="module"` or the bare `module` attribute).
fn instance_script(source: &str) -> Option<&str> {
    for caps in SCRIPT_BLOCK.captures_iter(source) {
        let attrs = caps.get(1).map_or("", |m| m.as_str());
        if attrs.contains("module") {
            continue;
        }
        return caps.get(2).map(|m| m.as_str());
    }
    None
}

/// Props from the instance script: the runes destructuring form when a
/// `$props()` call is present, otherwise legacy `export let` fields.
fn extract_props(source: &str, script: &str) -> Vec<PropDefinition> {
    match runes_props(source, script) {
        Some(props) => props,
        None => export_let_props(script),
    }
}

fn runes_props(source: &str, script: &str) -> Option<Vec<PropDefinition>> {
    let call = props_call_offset(script)?;
    let before = &script[..call];
    let Some(open) = destructure_open(before) else {
        // `let props = $props()` binds the whole object; nothing itemized.
        return Some(Vec::new());
    };
    let body = extract_balanced(before, open)?;
    let mut props: Vec<PropDefinition> =
        parse_destructured_props(body).into_iter().map(prop_from_parsed).collect();

    // Between the closing brace and the `=` sits an optional `: Props`
    // annotation worth backfilling types and docs from.
    let close = matching_close(before, open)?;
    let tail = &before[close + 1..];
    if let Some(eq) = tail.rfind('=') {
        if let Some(type_name) = tail[..eq].trim().strip_prefix(':').map(str::trim) {
            if is_plain_ident(type_name) {
                if let Some(type_body) = find_type_body(source, type_name) {
                    merge_type_fields(&mut props, parse_type_fields(type_body));
                }
            }
        }
    }
    Some(props)
}

/// Offset of the `$props` rune call, ignoring `$props.id()` and other
/// member accesses.
fn props_call_offset(script: &str) -> Option<usize> {
    let mut search = 0;
    while let Some(rel) = script[search..].find("$props") {
        let at = search + rel;
        search = at + "$props".len();
        if script[search..].trim_start().starts_with('(') {
            return Some(at);
        }
    }
    None
}

/// Offset of the `{` opening the props destructuring pattern: the
/// nearest `let`/`const` keyword followed by a brace.
fn destructure_open(before: &str) -> Option<usize> {
    let mut best: Option<usize> = None;
    for kw in ["let", "const"] {
        let mut from = before.len();
        while let Some(at) = rfind_keyword(before, kw, from) {
            from = at;
            let trimmed = before[at + kw.len()..].trim_start();
            if trimmed.starts_with('{') {
                let open = before.len() - trimmed.len();
                if best.map_or(true, |b| open > b) {
                    best = Some(open);
                }
                break;
            }
        }
    }
    best
}

fn rfind_keyword(s: &str, word: &str, from: usize) -> Option<usize> {
    let mut limit = from;
    loop {
        let at = s[..limit].rfind(word)?;
        limit = at;
        let before_ok = !s[..at].chars().next_back().is_some_and(is_word_char);
        let after_ok = !s[at + word.len()..].chars().next().is_some_and(is_word_char);
        if before_ok && after_ok {
            return Some(at);
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn is_plain_ident(t: &str) -> bool {
    !t.is_empty()
        && t.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && t.chars().all(is_word_char)
}

fn export_let_props(script: &str) -> Vec<PropDefinition> {
    let mut props = Vec::new();
    for caps in EXPORT_LET.captures_iter(script) {
        let Some(name) = caps.get(1) else { continue };
        let whole = caps.get(0).map_or(name.start(), |m| m.start());

        let mut type_text = None;
        let mut default_text = None;
        let mut at = name.end();
        let rest = script[at..].trim_start();
        at += script[at..].len() - rest.len();
        if rest.starts_with(':') {
            let (ty, stop) = read_until_unnested(script, at + 1, &['=', ';', '\n'], TYPE_DELIMS);
            let ty = ty.trim();
            if !ty.is_empty() {
                type_text = Some(ty.to_string());
            }
            at = stop;
        }
        if script[at..].starts_with('=') {
            let (default, _) = read_until_unnested(script, at + 1, &[';', '\n'], CODE_DELIMS);
            let default = default.trim();
            if !default.is_empty() {
                default_text = Some(default.to_string());
            }
        }

        props.push(PropDefinition {
            name: name.as_str().to_string(),
            required: default_text.is_none(),
            default_text,
            type_text,
            description: doc_block_above(script, whole),
            bindable: false,
        });
    }
    props
}

/// True when the script opens with a block comment carrying `@deprecated`.
fn head_comment_deprecated(script: &str) -> bool {
    let head = script.trim_start();
    if !head.starts_with("/*") {
        return false;
    }
    match head.find("*/") {
        Some(end) => contains_deprecated(&head[..end]),
        None => false,
    }
}

/// Literal text of a `{…}` directive expression, when it is a string or
/// numeric literal rather than a dynamic binding.
fn literal_expression(expr: &str) -> Option<String> {
    let expr = expr.trim();
    let b = expr.as_bytes();
    if b.len() >= 2 && (b[0] == b'\'' || b[0] == b'"' || b[0] == b'`') && b[b.len() - 1] == b[0] {
        return Some(expr[1..expr.len() - 1].to_string());
    }
    expr.starts_with(|c: char| c.is_ascii_digit() || c == '#' || c == '-')
        .then(|| expr.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tokendrift_core::types::signal::SignalKind;

    fn extract_at(path: &str, source: &str) -> FileOutput<Component> {
        SvelteExtractor::new().extract(Path::new(path), source).unwrap()
    }

    #[test]
    fn legacy_export_let_props() {
        let src = "<script lang=\"ts\">\n  /** Visual emphasis. */\n  export let variant: 'primary' | 'secondary' = 'primary';\n  export let label: string;\n  export let disabled = false;\n</script>\n<button>{label}</button>\n";
        let out = extract_at("src/lib/my-button.svelte", src);
        assert_eq!(out.items.len(), 1);
        let c = &out.items[0];
        assert_eq!(c.name, "MyButton");
        assert_eq!(c.props.len(), 3);
        assert_eq!(c.props[0].name, "variant");
        assert_eq!(c.props[0].type_text.as_deref(), Some("'primary' | 'secondary'"));
        assert_eq!(c.props[0].default_text.as_deref(), Some("'primary'"));
        assert!(!c.props[0].required);
        assert_eq!(c.props[0].description.as_deref(), Some("Visual emphasis."));
        assert_eq!(c.props[1].name, "label");
        assert!(c.props[1].required);
        assert_eq!(c.props[2].default_text.as_deref(), Some("false"));
        assert_eq!(c.variants.len(), 2);
    }

    #[test]
    fn runes_props_with_type_backfill() {
        let src = "<script lang=\"ts\">\n  interface Props {\n    /** Accessible label. */\n    label: string;\n    size?: 'sm' | 'lg';\n    value?: number;\n  }\n  let { label, size = 'sm', value = $bindable(0) }: Props = $props();\n</script>\n<input aria-label={label} />\n";
        let out = extract_at("src/lib/number-input.svelte", src);
        let c = &out.items[0];
        assert_eq!(c.name, "NumberInput");
        assert_eq!(c.props.len(), 3);
        let label = c.props.iter().find(|p| p.name == "label").unwrap();
        assert!(label.required);
        assert_eq!(label.type_text.as_deref(), Some("string"));
        assert_eq!(label.description.as_deref(), Some("Accessible label."));
        let size = c.props.iter().find(|p| p.name == "size").unwrap();
        assert!(!size.required);
        assert_eq!(size.type_text.as_deref(), Some("'sm' | 'lg'"));
        let value = c.props.iter().find(|p| p.name == "value").unwrap();
        assert!(value.bindable);
        assert_eq!(value.default_text.as_deref(), Some("0"));
        assert_eq!(c.variants.len(), 2);
    }

    #[test]
    fn routing_files_are_skipped() {
        let src = "<script>\n  export let data;\n</script>\n<h1>{data.title}</h1>\n";
        let out = extract_at("src/routes/+page.svelte", src);
        assert!(out.items.is_empty());
        assert!(out.signals.is_empty());
    }

    #[test]
    fn style_block_yields_hardcoded_values_and_token_usage() {
        let src = "<script>\n  export let label;\n</script>\n<div class=\"card\">{label}</div>\n<style>\n  .card {\n    color: #ff0000;\n    padding: 16px;\n    background: var(--surface-bg);\n  }\n</style>\n";
        let out = extract_at("card.svelte", src);
        let c = &out.items[0];
        let hard: Vec<(&str, &str)> = c
            .metadata
            .hardcoded_values
            .iter()
            .map(|v| (v.property.as_str(), v.value.as_str()))
            .collect();
        assert!(hard.contains(&("color", "#ff0000")));
        assert!(hard.contains(&("padding", "16px")));
        assert!(!hard.iter().any(|(p, _)| *p == "background"));

        let color = out
            .signals
            .iter()
            .find(|s| s.kind == SignalKind::ColorValue && s.value == "#ff0000")
            .unwrap();
        assert_eq!(color.context.scope, SignalScope::Component);
        assert!(out
            .signals
            .iter()
            .any(|s| s.kind == SignalKind::TokenUsage && s.value == "--surface-bg"));
    }

    #[test]
    fn inline_style_attribute_is_inline_scoped() {
        let src = "<div style=\"margin: 8px; color: var(--text)\">hi</div>\n";
        let out = extract_at("box.svelte", src);
        let c = &out.items[0];
        assert!(c
            .metadata
            .hardcoded_values
            .iter()
            .any(|v| v.property == "margin" && v.value == "8px"));
        let margin = out
            .signals
            .iter()
            .find(|s| s.kind == SignalKind::SpacingValue && s.value == "8px")
            .unwrap();
        assert_eq!(margin.context.scope, SignalScope::Inline);
        assert!(out
            .signals
            .iter()
            .any(|s| s.kind == SignalKind::TokenUsage && s.value == "--text"));
    }

    #[test]
    fn style_directives_take_literals_only() {
        let src = "<main style:background-color=\"#eee\" style:width={width}>x</main>\n";
        let out = extract_at("page-shell.svelte", src);
        let c = &out.items[0];
        assert!(c
            .metadata
            .hardcoded_values
            .iter()
            .any(|v| v.property == "background-color" && v.value == "#eee"));
        assert!(!c.metadata.hardcoded_values.iter().any(|v| v.property == "width"));
    }

    #[test]
    fn imports_and_tags_become_dependencies() {
        let src = "<script>\n  import Icon from './Icon.svelte';\n  import Button from '../Button.svelte';\n</script>\n<Button><Icon name=\"x\" /></Button>\n";
        let out = extract_at("card.svelte", src);
        let c = &out.items[0];
        assert_eq!(c.dependencies, vec!["Icon".to_string(), "Button".to_string()]);
        assert!(out
            .signals
            .iter()
            .any(|s| s.kind == SignalKind::ComponentUsage && s.value == "Button"));
    }

    #[test]
    fn component_comment_marks_documented() {
        let src = "<!--\n@component\nA themed button.\n-->\n<button>ok</button>\n";
        let out = extract_at("themed-button.svelte", src);
        assert!(out.items[0].metadata.documented);
        assert!(!out.items[0].metadata.deprecated);
    }

    #[test]
    fn deprecated_markers_detected() {
        let src = "<!-- @deprecated use NewCard -->\n<div>old</div>\n";
        let out = extract_at("old-card.svelte", src);
        assert!(out.items[0].metadata.deprecated);

        let src = "<script>\n/* @deprecated */\nexport let x;\n</script>\n";
        let out = extract_at("older-card.svelte", src);
        assert!(out.items[0].metadata.deprecated);
    }

    #[test]
    fn design_system_import_tags_component() {
        let src = "<script>\n  import { theme } from '@acme/design-tokens';\n  export let label;\n</script>\n<span>{label}</span>\n";
        let out = SvelteExtractor::new()
            .with_design_system("@acme/design-tokens")
            .extract(Path::new("chip.svelte"), src)
            .unwrap();
        assert!(out.items[0].metadata.tags.iter().any(|t| t == "design-system"));
    }

    #[test]
    fn module_script_exports_are_not_props() {
        let src = "<script context=\"module\">\n  export let shared = 1;\n</script>\n<script>\n  export let real;\n</script>\n<p>{real}</p>\n";
        let out = extract_at("split.svelte", src);
        let c = &out.items[0];
        assert_eq!(c.props.len(), 1);
        assert_eq!(c.props[0].name, "real");
    }
}
