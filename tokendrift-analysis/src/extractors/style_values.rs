//! Literal style-value extraction shared by the dialect extractors.
//!
//! Walks CSS regions, inline `style` attributes, and JS style objects,
//! producing `(property, value, line)` triples. `StyleSink` filters the
//! triples down to hardcoded colors and spacing, deduplicated per file
//! by (property, value).

use std::sync::LazyLock;

use regex::Regex;
use tokendrift_core::types::collections::FxHashSet;
use tokendrift_core::types::component::HardcodedValue;
use tokendrift_core::types::signal::SignalKind;

use crate::normalize::{normalize_color, normalize_spacing};
use crate::parsing::balanced::{read_until_unnested, split_top_level, CODE_DELIMS};
use crate::parsing::comments::line_of_offset;
use crate::signals::{canonical_property, classify_property, is_token_reference};

static VAR_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"var\(\s*(--[A-Za-z0-9_-]+)").expect("var() pattern"));

/// Opening of a JSX `style={{ … }}` object; the match ends on the inner
/// brace so balanced extraction can take over.
pub(crate) static STYLE_OBJECT_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"style\s*=\s*\{\s*\{").expect("style object pattern"));

/// Custom-property names referenced through `var(--x)` in `text`.
pub(crate) fn var_references(text: &str) -> Vec<&str> {
    VAR_REF.captures_iter(text).filter_map(|c| c.get(1)).map(|m| m.as_str()).collect()
}

/// Byte offset of `region` within `src`. `region` must be a subslice of
/// `src`.
pub(crate) fn offset_in(src: &str, region: &str) -> usize {
    region.as_ptr() as usize - src.as_ptr() as usize
}

/// Contents of `tag`-prefixed template literals (`` css`…` ``), as
/// slices into `src`. An optional generic argument between tag and
/// backtick is tolerated (`` html<Card>`…` ``). Regions end at the next
/// backtick; interpolations that nest further backticks are cut short
/// there.
pub(crate) fn template_regions<'a>(src: &'a str, tag: &str) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut search = 0;
    while let Some(rel) = src[search..].find(tag) {
        let at = search + rel;
        search = at + tag.len();
        let bound = src[..at]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
        if bound {
            continue;
        }
        let Some(open) = backtick_after(&src[search..]) else { continue };
        let start = search + open + 1;
        match src[start..].find('`') {
            Some(end_rel) => {
                out.push(&src[start..start + end_rel]);
                search = start + end_rel + 1;
            }
            None => break,
        }
    }
    out
}

/// Offset of the opening backtick in `rest`, skipping leading
/// whitespace and one balanced `<…>` generic argument. None when the
/// next token is anything else.
fn backtick_after(rest: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in rest.char_indices() {
        match c {
            '`' if depth == 0 => return Some(i),
            '<' => depth += 1,
            '>' if depth > 0 => depth -= 1,
            c if c.is_whitespace() => {}
            _ if depth == 0 => return None,
            _ => {}
        }
    }
    None
}

/// Accumulates hardcoded style values for one file.
pub(crate) struct StyleSink {
    values: Vec<HardcodedValue>,
    seen: FxHashSet<(String, String)>,
}

impl StyleSink {
    pub fn new() -> Self {
        Self { values: Vec::new(), seen: FxHashSet::default() }
    }

    /// Record one property/value pair when the value is a literal color
    /// or spacing. Token references and custom-property definitions are
    /// skipped.
    pub fn record(&mut self, property: &str, raw_value: &str, line: u32) {
        let property = canonical_property(property);
        if property.starts_with("--") {
            return;
        }
        let value = unquote(raw_value.trim());
        if value.is_empty() || is_token_reference(value) {
            return;
        }
        if !is_literal_style_value(&property, value) {
            return;
        }
        let key = (property.clone(), value.to_string());
        if self.seen.insert(key) {
            self.values.push(HardcodedValue { property, value: value.to_string(), line });
        }
    }

    pub fn finish(self) -> Vec<HardcodedValue> {
        self.values
    }
}

/// Whether a value is a literal the drift engine should flag on this
/// property. Colors count anywhere; bare numbers count only on spacing
/// properties, other dimensions need an explicit length unit.
fn is_literal_style_value(property: &str, value: &str) -> bool {
    if normalize_color(value).is_some() {
        return true;
    }
    match classify_property(property) {
        Some(SignalKind::SpacingValue) => normalize_spacing(value).is_some(),
        Some(_) => false,
        None => has_length_unit(value) && normalize_spacing(value).is_some(),
    }
}

fn has_length_unit(value: &str) -> bool {
    let v = value.trim().to_ascii_lowercase();
    v.ends_with("px") || v.ends_with("rem") || v.ends_with("em")
}

/// `(property, value, line)` triples for simple `prop: value;` lines in
/// a CSS region. Selector, at-rule, and comment lines are skipped.
/// `region` must be a subslice of `src`.
pub(crate) fn css_declarations<'r>(src: &str, region: &'r str) -> Vec<(String, &'r str, u32)> {
    let mut out = Vec::new();
    for line_text in region.lines() {
        let t = line_text.trim();
        if t.is_empty()
            || t.starts_with("//")
            || t.starts_with("/*")
            || t.starts_with('*')
            || t.starts_with('@')
            || t.starts_with('<')
            || t.starts_with('}')
            || t.contains('{')
        {
            continue;
        }
        let Some((prop, value)) = t.split_once(':') else { continue };
        let prop = prop.trim();
        if !is_css_ident(prop) {
            continue;
        }
        let value = value.trim().trim_end_matches(';').trim_end();
        if value.is_empty() {
            continue;
        }
        let line = line_of_offset(src, offset_in(src, line_text));
        out.push((prop.to_string(), value, line));
    }
    out
}

/// `(property, value)` pairs from an inline `style="..."` value.
pub(crate) fn inline_style_entries(attr: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for piece in attr.split(';') {
        let Some((prop, value)) = piece.split_once(':') else { continue };
        let prop = prop.trim();
        let value = value.trim();
        if is_css_ident(prop) && !value.is_empty() {
            out.push((prop.to_string(), value.to_string()));
        }
    }
    out
}

/// `(property, value, line)` triples from a JS style-object body
/// (`marginTop: 8, color: '#fff'`). `body` must be a subslice of `src`.
pub(crate) fn style_object_entries(src: &str, body: &str) -> Vec<(String, String, u32)> {
    let mut out = Vec::new();
    for piece in split_top_level(body, ',', CODE_DELIMS) {
        let trimmed = piece.trim();
        if trimmed.is_empty() || trimmed.starts_with("...") {
            continue;
        }
        let (lhs, colon) = read_until_unnested(piece, 0, &[':'], CODE_DELIMS);
        if colon >= piece.len() {
            continue;
        }
        let prop = unquote(lhs.trim());
        if !is_css_ident(prop) {
            continue;
        }
        let value = unquote(piece[colon + 1..].trim());
        if value.is_empty() {
            continue;
        }
        let line = line_of_offset(src, offset_in(src, piece));
        out.push((prop.to_string(), value.to_string(), line));
    }
    out
}

fn is_css_ident(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        && s.chars().any(|c| c.is_ascii_alphabetic())
}

fn unquote(s: &str) -> &str {
    let b = s.as_bytes();
    if b.len() >= 2 && matches!(b[0], b'\'' | b'"' | b'`') && b[b.len() - 1] == b[0] {
        &s[1..s.len() - 1]
    } else {
        s
    }
}
