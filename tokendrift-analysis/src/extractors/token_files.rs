//! Design-token source files: JSON token documents and stylesheet
//! variable declarations.
//!
//! JSON handles both W3C documents (`$value`/`$type`, group-level types
//! inherited) and Style Dictionary nesting (leaf objects with `value`).
//! Names are the dotted path to the leaf. Stylesheets contribute
//! `--custom-property` and `$scss-variable` declarations. A token whose
//! whole value is a reference to another token in the same file takes
//! that token's value and registers itself as an alias of it.

use std::path::Path;

use aho_corasick::{AhoCorasick, MatchKind};
use tokendrift_core::errors::ExtractError;
use tokendrift_core::types::collections::FxHashSet;
use tokendrift_core::types::component::Dialect;
use tokendrift_core::types::signal::SignalContext;
use tokendrift_core::types::token::{DesignToken, TokenCategory, TokenSource, TokenValue};

use crate::normalize::{normalize_color, spacing_parts};
use crate::parsing::comments::line_of_offset;
use crate::signals::SignalCollector;

use super::style_values::var_references;
use super::traits::{FileExtractor, FileOutput};

/// Extracts design tokens from `.json`, `.css`, and `.scss` files.
pub struct TokenFileExtractor;

impl TokenFileExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TokenFileExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FileExtractor for TokenFileExtractor {
    type Item = DesignToken;

    fn name(&self) -> &'static str {
        "token_files"
    }

    fn extract(&self, path: &Path, source: &str) -> Result<FileOutput<DesignToken>, ExtractError> {
        let format = file_format(path);
        let mut collector =
            SignalCollector::new(path, SignalContext::for_dialect(Dialect::TokenFile));
        let mut pending = Vec::new();
        let mut usages: Vec<(String, u32)> = Vec::new();

        if format == "json" {
            let root: serde_json::Value = serde_json::from_str(source)
                .map_err(|e| ExtractError::parse(format!("invalid token JSON: {e}")))?;
            let mut lines = LineFinder::new(source);
            walk_json(&root, &mut Vec::new(), None, &mut lines, &mut pending);
        } else {
            scan_stylesheet(source, &mut pending, &mut usages);
        }

        let mut tokens: Vec<DesignToken> = Vec::with_capacity(pending.len());
        let mut references: Vec<(usize, String)> = Vec::new();
        for p in pending {
            if let Some(target) = pure_reference(&p.raw) {
                // var() usages were already picked up by the line scan.
                if !p.raw.contains("var(") {
                    usages.push((target.clone(), p.line));
                }
                references.push((tokens.len(), target));
            }
            let (value, sniffed) = token_value(&p.raw);
            let category = p.declared_type.as_deref().map(category_from_type).unwrap_or(sniffed);
            tokens.push(DesignToken::new(
                p.name,
                category,
                value,
                p.raw,
                TokenSource { path: path.to_path_buf(), line: p.line, format: format.to_string() },
            ));
        }

        for (idx, target_name) in references {
            let Some(target_idx) = tokens.iter().position(|t| t.name == target_name) else {
                continue;
            };
            if target_idx == idx {
                continue;
            }
            let value = tokens[target_idx].value.clone();
            let category = tokens[target_idx].category;
            let alias = tokens[idx].name.clone();
            tokens[target_idx].aliases.push(alias);
            let referrer = &mut tokens[idx];
            referrer.value = value;
            if referrer.category == TokenCategory::Other {
                referrer.category = category;
            }
        }

        for t in &tokens {
            collector.collect_token_def(&t.name, &t.raw_value, t.source.line);
        }
        for (name, line) in usages {
            collector.collect_token_usage(&name, line);
        }
        Ok(FileOutput::new(tokens, collector.into_signals()))
    }
}

struct PendingToken {
    name: String,
    declared_type: Option<String>,
    raw: String,
    line: u32,
}

fn walk_json(
    node: &serde_json::Value,
    path: &mut Vec<String>,
    inherited_type: Option<&str>,
    lines: &mut LineFinder,
    out: &mut Vec<PendingToken>,
) {
    let Some(map) = node.as_object() else { return };
    let node_type = map.get("$type").and_then(|v| v.as_str()).or(inherited_type);

    if !path.is_empty() {
        if let Some(value) = map.get("$value") {
            out.push(PendingToken {
                name: path.join("."),
                declared_type: node_type.map(str::to_string),
                raw: json_text(value),
                line: lines.line_for_key(path.last().map(String::as_str).unwrap_or_default()),
            });
            return;
        }
        if let Some(value) = map.get("value") {
            let declared = map.get("type").and_then(|v| v.as_str()).or(node_type);
            out.push(PendingToken {
                name: path.join("."),
                declared_type: declared.map(str::to_string),
                raw: json_text(value),
                line: lines.line_for_key(path.last().map(String::as_str).unwrap_or_default()),
            });
            return;
        }
    }

    for (key, child) in map {
        if key.starts_with('$') || !child.is_object() {
            continue;
        }
        path.push(key.clone());
        walk_json(child, path, node_type, lines, out);
        path.pop();
    }
}

fn json_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Custom-property and SCSS-variable declarations, plus every `var()`
/// usage, line by line.
fn scan_stylesheet(source: &str, out: &mut Vec<PendingToken>, usages: &mut Vec<(String, u32)>) {
    for (idx, line_text) in source.lines().enumerate() {
        let line = idx as u32 + 1;
        let t = line_text.trim();
        if t.starts_with("//") || t.starts_with("/*") || t.starts_with('*') {
            continue;
        }
        for token in var_references(line_text) {
            usages.push((token.to_string(), line));
        }
        if !(t.starts_with("--") || t.starts_with('$')) {
            continue;
        }
        let Some((name, rest)) = t.split_once(':') else { continue };
        let name = name.trim();
        if !is_token_name(name) {
            continue;
        }
        let raw = rest.trim().trim_end_matches(';').trim_end();
        let raw = raw.strip_suffix("!default").map(str::trim_end).unwrap_or(raw);
        let raw = raw.strip_suffix("!important").map(str::trim_end).unwrap_or(raw);
        if raw.is_empty() {
            continue;
        }
        out.push(PendingToken {
            name: name.to_string(),
            declared_type: None,
            raw: raw.to_string(),
            line,
        });
    }
}

fn is_token_name(name: &str) -> bool {
    let rest = name.strip_prefix("--").or_else(|| name.strip_prefix('$'));
    rest.is_some_and(|r| {
        !r.is_empty() && r.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    })
}

/// Target name when `raw` is nothing but a reference to another token:
/// `{color.primary}` (W3C), `{color.primary.value}` (Style Dictionary),
/// `var(--x)` without a fallback, or a bare SCSS variable.
fn pure_reference(raw: &str) -> Option<String> {
    let t = raw.trim();
    if let Some(inner) = t.strip_prefix('{').and_then(|r| r.strip_suffix('}')) {
        let inner = inner.trim();
        if !inner.is_empty() && !inner.contains('{') {
            let inner = inner.strip_suffix(".value").unwrap_or(inner);
            return Some(inner.to_string());
        }
    }
    if let Some(inner) = t.strip_prefix("var(").and_then(|r| r.strip_suffix(')')) {
        let inner = inner.trim();
        if inner.starts_with("--")
            && inner.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Some(inner.to_string());
        }
    }
    if t.starts_with('$') && is_token_name(t) {
        return Some(t.to_string());
    }
    None
}

fn token_value(raw: &str) -> (TokenValue, TokenCategory) {
    if let Some(hex) = normalize_color(raw) {
        return (TokenValue::Color { hex }, TokenCategory::Color);
    }
    if let Some((value, unit)) = spacing_parts(raw) {
        return (TokenValue::Spacing { value, unit }, TokenCategory::Spacing);
    }
    (TokenValue::Raw { text: raw.to_string() }, TokenCategory::Other)
}

fn category_from_type(declared: &str) -> TokenCategory {
    let t = declared.trim().to_ascii_lowercase();
    match t.as_str() {
        "color" => TokenCategory::Color,
        "dimension" | "spacing" | "space" | "size" | "sizing" | "gap" => TokenCategory::Spacing,
        "shadow" | "boxshadow" | "box-shadow" => TokenCategory::Shadow,
        _ if t.starts_with("font")
            || t == "typography"
            || t == "lineheight"
            || t == "line-height"
            || t == "letterspacing" =>
        {
            TokenCategory::Typography
        }
        _ if t.starts_with("border") || t == "radius" || t == "stroke" => TokenCategory::Border,
        _ => TokenCategory::Other,
    }
}

fn file_format(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => "json",
        Some("scss") | Some("sass") => "scss",
        _ => "css",
    }
}

/// Finds source lines for JSON keys. `serde_json` maps lose document
/// order, so each key claims its first unclaimed textual occurrence.
struct LineFinder<'s> {
    source: &'s str,
    claimed: FxHashSet<u32>,
}

impl<'s> LineFinder<'s> {
    fn new(source: &'s str) -> Self {
        Self { source, claimed: FxHashSet::default() }
    }

    fn line_for_key(&mut self, key: &str) -> u32 {
        if key.is_empty() {
            return 1;
        }
        let needle = format!("\"{key}\"");
        let mut search = 0;
        while let Some(rel) = self.source[search..].find(&needle) {
            let at = search + rel;
            search = at + needle.len();
            if !self.source[search..].trim_start().starts_with(':') {
                continue;
            }
            let line = line_of_offset(self.source, at);
            if self.claimed.insert(line) {
                return line;
            }
        }
        1
    }
}

/// Locates token mentions in arbitrary source text, for usage
/// back-references. Patterns are token names plus aliases;
/// leftmost-longest matching keeps `--color-primary-dark` from
/// registering a use of `--color-primary`.
pub struct TokenUsageIndex {
    automaton: Option<AhoCorasick>,
    ids: Vec<String>,
}

impl TokenUsageIndex {
    pub fn build(tokens: &[DesignToken]) -> Self {
        let mut patterns: Vec<&str> = Vec::new();
        let mut ids = Vec::new();
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        // Token names first so an alias never shadows the token that
        // actually carries the name.
        for t in tokens {
            if seen.insert(t.name.as_str()) {
                patterns.push(t.name.as_str());
                ids.push(t.id.clone());
            }
        }
        for t in tokens {
            for alias in &t.aliases {
                if seen.insert(alias.as_str()) {
                    patterns.push(alias.as_str());
                    ids.push(t.id.clone());
                }
            }
        }
        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .ok();
        Self { automaton, ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Distinct token ids mentioned in `haystack`, in first-match order.
    /// Matches inside longer identifiers do not count.
    pub fn token_ids_in(&self, haystack: &str) -> Vec<String> {
        let Some(automaton) = &self.automaton else { return Vec::new() };
        let mut out: Vec<String> = Vec::new();
        for m in automaton.find_iter(haystack) {
            let before = haystack[..m.start()].chars().next_back();
            if before.is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
                continue;
            }
            let after = haystack[m.end()..].chars().next();
            if after.is_some_and(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
                continue;
            }
            let id = &self.ids[m.pattern().as_usize()];
            if !out.iter().any(|seen| seen == id) {
                out.push(id.clone());
            }
        }
        out
    }
}
