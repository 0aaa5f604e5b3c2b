//! React component extraction.
//!
//! Detection is line-regex based (function, arrow, `forwardRef`, `memo`,
//! and class declarations with leading-capital names); everything inside
//! a declaration (parameter lists, type bodies, style objects) is read
//! with the balanced primitives rather than regex.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tokendrift_core::errors::ExtractError;
use tokendrift_core::types::component::{Component, ComponentSource, Dialect, PropDefinition};
use tokendrift_core::types::signal::{SignalContext, SignalScope};

use crate::parsing::balanced::{
    extract_balanced, matching_close, read_until_unnested, split_top_level, CODE_DELIMS,
    TYPE_DELIMS,
};
use crate::parsing::comments::{deprecated_above, doc_block_above, line_of_offset};
use crate::parsing::props::{find_type_body, parse_destructured_props, parse_type_fields};
use crate::signals::SignalCollector;

use super::dependencies::{capital_tag_occurrences, imports_package, relative_import_components};
use super::fields::{merge_type_fields, prop_from_parsed};
use super::style_values::{style_object_entries, var_references, StyleSink, STYLE_OBJECT_OPEN};
use super::traits::{FileExtractor, FileOutput};
use super::variants::variants_from_props;

static FORWARD_REF_COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*(?:export\s+)?(?:default\s+)?const\s+([A-Z][A-Za-z0-9_]*)\s*(?::[^=\n]+?)?\s*=\s*(?:React\.)?forwardRef\b",
    )
    .expect("forwardRef pattern")
});

static MEMO_COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*(?:export\s+)?(?:default\s+)?const\s+([A-Z][A-Za-z0-9_]*)\s*(?::[^=\n]+?)?\s*=\s*(?:React\.)?memo\b",
    )
    .expect("memo pattern")
});

static CLASS_COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*(?:export\s+)?(?:default\s+)?(?:abstract\s+)?class\s+([A-Z][A-Za-z0-9_]*)\s+extends\s+(?:React\.)?(?:Pure)?Component\b",
    )
    .expect("class pattern")
});

static FUNCTION_COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s+([A-Z][A-Za-z0-9_]*)")
        .expect("function pattern")
});

static ARROW_COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*(?:export\s+)?const\s+([A-Z][A-Za-z0-9_]*)\s*(?::[^=\n]+?)?\s*=\s*(?:async\s+)?(\(|[A-Za-z_$][\w$]*\s*=>)",
    )
    .expect("arrow pattern")
});

struct Detection {
    name: String,
    offset: usize,
    exported: bool,
    props: Vec<PropDefinition>,
    props_type: Option<String>,
}

/// Extracts components from `.tsx` / `.jsx` sources.
pub struct ReactExtractor {
    design_system_package: Option<String>,
}

impl ReactExtractor {
    pub fn new() -> Self {
        Self { design_system_package: None }
    }

    /// Components importing from `package` get tagged `design-system`.
    pub fn with_design_system(mut self, package: impl Into<String>) -> Self {
        self.design_system_package = Some(package.into());
        self
    }
}

impl Default for ReactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FileExtractor for ReactExtractor {
    type Item = Component;

    fn name(&self) -> &'static str {
        "react"
    }

    fn extract(&self, path: &Path, source: &str) -> Result<FileOutput<Component>, ExtractError> {
        let mut output = FileOutput::default();
        let mut collector = SignalCollector::new(path, SignalContext::for_dialect(Dialect::React));
        let mut sink = StyleSink::new();

        collector.set_scope(SignalScope::Inline);
        for m in STYLE_OBJECT_OPEN.find_iter(source) {
            let Some(body) = extract_balanced(source, m.end() - 1) else { continue };
            for (prop, value, line) in style_object_entries(source, body) {
                sink.record(&prop, &value, line);
                collector.collect_from_value(&prop, &value, line);
                for token in var_references(&value) {
                    collector.collect_token_usage(token, line);
                }
            }
        }
        collector.set_scope(SignalScope::Global);

        let detections = detect_components(source);
        let imports = relative_import_components(source);
        let tag_uses = capital_tag_occurrences(source);
        for (tag, at) in &tag_uses {
            collector.collect_component_usage(tag, line_of_offset(source, *at));
        }
        let is_design_system = self
            .design_system_package
            .as_deref()
            .is_some_and(|pkg| imports_package(source, pkg));

        let hardcoded = sink.finish();
        let spans: Vec<usize> = detections.iter().map(|d| d.offset).collect();

        for (idx, det) in detections.iter().enumerate() {
            let line = line_of_offset(source, det.offset);
            let mut component = Component::new(
                det.name.clone(),
                ComponentSource {
                    dialect: Dialect::React,
                    path: path.to_path_buf(),
                    exported_as: det.exported.then(|| det.name.clone()),
                    line,
                },
            );

            let mut props = det.props.clone();
            if let Some(type_name) = &det.props_type {
                if let Some(body) = find_type_body(source, type_name) {
                    merge_type_fields(&mut props, parse_type_fields(body));
                }
            }
            component.variants = variants_from_props(&props);
            component.props = props;

            component.metadata.documented = doc_block_above(source, det.offset).is_some();
            component.metadata.deprecated = deprecated_above(source, det.offset);
            if is_design_system {
                component.metadata.tags.push("design-system".into());
            }

            let mut deps: Vec<String> =
                imports.iter().filter(|n| **n != det.name).cloned().collect();
            for (tag, at) in &tag_uses {
                if span_index(&spans, *at) == idx && *tag != det.name && !deps.contains(tag) {
                    deps.push(tag.clone());
                }
            }
            component.dependencies = deps;

            component.metadata.hardcoded_values = hardcoded
                .iter()
                .filter(|v| {
                    let at = line_start_offset(source, v.line);
                    span_index(&spans, at) == idx
                })
                .cloned()
                .collect();

            collector.collect_component_def(&det.name, line);
            output.items.push(component);
        }

        output.signals = collector.into_signals();
        Ok(output)
    }
}

/// Index of the detection span containing byte offset `at`. Offsets
/// before the first detection attach to it.
fn span_index(starts: &[usize], at: usize) -> usize {
    starts.partition_point(|s| *s <= at).saturating_sub(1)
}

/// Byte offset of the start of 1-based `line`.
fn line_start_offset(src: &str, line: u32) -> usize {
    if line <= 1 {
        return 0;
    }
    let mut seen = 1;
    for (idx, b) in src.bytes().enumerate() {
        if b == b'\n' {
            seen += 1;
            if seen == line {
                return idx + 1;
            }
        }
    }
    src.len()
}

fn detect_components(source: &str) -> Vec<Detection> {
    fn claim(detections: &mut Vec<Detection>, claimed: &mut Vec<String>, det: Detection) {
        if !claimed.contains(&det.name) {
            claimed.push(det.name.clone());
            detections.push(det);
        }
    }

    let mut detections: Vec<Detection> = Vec::new();
    let mut claimed: Vec<String> = Vec::new();

    for caps in FORWARD_REF_COMPONENT.captures_iter(source) {
        let whole = caps.get(0).map(|m| (m.start(), m.end(), m.as_str())).unwrap_or_default();
        let (props, props_type) = call_component_props(source, whole.1, true);
        claim(
            &mut detections,
            &mut claimed,
            Detection {
                name: caps[1].to_string(),
                offset: whole.0,
                exported: whole.2.contains("export"),
                props,
                props_type,
            },
        );
    }

    for caps in MEMO_COMPONENT.captures_iter(source) {
        let whole = caps.get(0).map(|m| (m.start(), m.end(), m.as_str())).unwrap_or_default();
        let (props, props_type) = call_component_props(source, whole.1, false);
        claim(
            &mut detections,
            &mut claimed,
            Detection {
                name: caps[1].to_string(),
                offset: whole.0,
                exported: whole.2.contains("export"),
                props,
                props_type,
            },
        );
    }

    for caps in CLASS_COMPONENT.captures_iter(source) {
        let whole = caps.get(0).map(|m| (m.start(), m.end(), m.as_str())).unwrap_or_default();
        let props_type = generic_arg(source, whole.1, 0);
        claim(
            &mut detections,
            &mut claimed,
            Detection {
                name: caps[1].to_string(),
                offset: whole.0,
                exported: whole.2.contains("export"),
                props: Vec::new(),
                props_type,
            },
        );
    }

    for caps in FUNCTION_COMPONENT.captures_iter(source) {
        let whole = caps.get(0).map(|m| (m.start(), m.end(), m.as_str())).unwrap_or_default();
        let (_, open) = read_until_unnested(source, whole.1, &['('], TYPE_DELIMS);
        let Some(params) = extract_balanced(source, open) else { continue };
        let Some(close) = matching_close(source, open) else { continue };
        let (_, body_open) = read_until_unnested(source, close + 1, &['{'], TYPE_DELIMS);
        let body = extract_balanced(source, body_open).unwrap_or("");
        if !looks_like_jsx(body) {
            continue;
        }
        let (props, props_type) = props_from_params(params);
        claim(
            &mut detections,
            &mut claimed,
            Detection {
                name: caps[1].to_string(),
                offset: whole.0,
                exported: whole.2.contains("export"),
                props,
                props_type,
            },
        );
    }

    for caps in ARROW_COMPONENT.captures_iter(source) {
        let whole = caps.get(0).map(|m| (m.start(), m.end(), m.as_str())).unwrap_or_default();
        let (props, props_type, after_params) = match caps.get(2) {
            Some(m) if m.as_str().starts_with('(') => {
                let open = m.start();
                let Some(params) = extract_balanced(source, open) else { continue };
                let Some(close) = matching_close(source, open) else { continue };
                let (props, props_type) = props_from_params(params);
                (props, props_type, close + 1)
            }
            _ => (Vec::new(), None, whole.1),
        };
        let (statement, _) = read_until_unnested(source, after_params, &[';'], CODE_DELIMS);
        if !looks_like_jsx(statement) {
            continue;
        }
        claim(
            &mut detections,
            &mut claimed,
            Detection {
                name: caps[1].to_string(),
                offset: whole.0,
                exported: whole.2.contains("export"),
                props,
                props_type,
            },
        );
    }

    detections.sort_by_key(|d| d.offset);
    detections
}

/// Props of a `forwardRef(...)` / `memo(...)` wrapped component: from
/// the inner function's parameters, with the props type taken from the
/// second `forwardRef` generic argument when the annotation is absent.
fn call_component_props(
    source: &str,
    after_kw: usize,
    generic_second_arg: bool,
) -> (Vec<PropDefinition>, Option<String>) {
    let generic = if generic_second_arg { generic_arg(source, after_kw, 1) } else { None };
    let (_, open) = read_until_unnested(source, after_kw, &['('], TYPE_DELIMS);
    let params = extract_balanced(source, open).and_then(inner_params);
    match params {
        Some(params) => {
            let (props, annotation) = props_from_params(params);
            (props, annotation.or(generic))
        }
        None => (Vec::new(), generic),
    }
}

/// `index`-th generic argument right after `after` (`<A, B>`), when the
/// next non-space character opens a generic list and the argument is a
/// plain identifier.
fn generic_arg(source: &str, after: usize, index: usize) -> Option<String> {
    let rest = &source[after..];
    let trimmed = rest.trim_start();
    if !trimmed.starts_with('<') {
        return None;
    }
    let lt = after + (rest.len() - trimmed.len());
    let args = extract_balanced(source, lt)?;
    let parts = split_top_level(args, ',', TYPE_DELIMS);
    let arg = parts.get(index)?.trim();
    is_type_ident(arg).then(|| arg.to_string())
}

/// Parameter list of the function inside a `memo(...)`/`forwardRef(...)`
/// call body, unwrapping one nested `forwardRef` level.
fn inner_params(call_body: &str) -> Option<&str> {
    let mut region = call_body.trim_start();
    if region.starts_with("React.forwardRef") || region.starts_with("forwardRef") {
        let open = region.find('(')?;
        region = extract_balanced(region, open)?.trim_start();
    }
    let open = region.find('(')?;
    extract_balanced(region, open)
}

/// Props and type annotation from a parameter list. Only the first
/// parameter matters: either a destructuring pattern (with an optional
/// `: Type`) or `props: Type`.
fn props_from_params(params: &str) -> (Vec<PropDefinition>, Option<String>) {
    let pieces = split_top_level(params, ',', CODE_DELIMS);
    let Some(first) = pieces.first() else { return (Vec::new(), None) };
    let first = first.trim();

    if let Some(brace) = first.find('{') {
        if first[..brace].trim().is_empty() {
            let Some(body) = extract_balanced(first, brace) else { return (Vec::new(), None) };
            let props: Vec<PropDefinition> =
                parse_destructured_props(body).into_iter().map(prop_from_parsed).collect();
            let annotation = matching_close(first, brace)
                .map(|close| first[close + 1..].trim())
                .and_then(|rest| rest.strip_prefix(':'))
                .map(str::trim)
                .filter(|t| is_type_ident(t))
                .map(str::to_string);
            return (props, annotation);
        }
    }

    let (_, colon) = read_until_unnested(first, 0, &[':'], CODE_DELIMS);
    let annotation = (colon < first.len())
        .then(|| first[colon + 1..].trim())
        .filter(|t| is_type_ident(t))
        .map(str::to_string);
    (Vec::new(), annotation)
}

fn is_type_ident(t: &str) -> bool {
    !t.is_empty()
        && t.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && t.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn looks_like_jsx(region: &str) -> bool {
    region.contains("/>")
        || region.contains("</")
        || region.contains("<>")
        || region.contains("createElement")
}
