//! Prop extraction from destructuring patterns and object type bodies.

use crate::parsing::balanced::{
    extract_balanced, read_until_unnested, split_top_level, CODE_DELIMS, TYPE_DELIMS,
};
use crate::parsing::comments::{clean_doc_block, clean_line_comments};

/// One binding from a component's props destructuring pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedProp {
    /// Public prop name, as consumers pass it.
    pub name: String,
    /// Local binding when the pattern renames (`{ class: className }`).
    pub local_name: Option<String>,
    /// Default expression text, when present.
    pub default_text: Option<String>,
    /// Svelte 5 `$bindable()` qualifier.
    pub bindable: bool,
}

/// Parse the inside of a destructuring pattern (the text between the
/// braces of `{ a, b = 1, c: d }`).
///
/// Rest spreads (`...rest`) are not props and are skipped. For nested
/// patterns (`{ pos: { x, y } }`) only the outer name is recorded; the
/// inner bindings never become props.
pub fn parse_destructured_props(pattern_body: &str) -> Vec<ParsedProp> {
    split_top_level(pattern_body, ',', CODE_DELIMS)
        .into_iter()
        .filter_map(parse_prop_piece)
        .collect()
}

fn parse_prop_piece(piece: &str) -> Option<ParsedProp> {
    let piece = piece.trim();
    if piece.is_empty() || piece.starts_with("...") {
        return None;
    }

    // `name [: target] [= default]`, split at the first top-level `=`.
    let (lhs, eq) = read_until_unnested(piece, 0, &['='], CODE_DELIMS);
    let default_raw = (eq < piece.len()).then(|| piece[eq + 1..].trim());

    let lhs = lhs.trim();
    let (name_part, colon) = read_until_unnested(lhs, 0, &[':'], CODE_DELIMS);
    let name = unquote(name_part.trim());
    if !is_identifier(&name) {
        return None;
    }
    let local_name = (colon < lhs.len())
        .then(|| lhs[colon + 1..].trim())
        .filter(|target| !target.starts_with('{') && !target.starts_with('['))
        .map(str::to_string);

    let (default_text, bindable) = match default_raw {
        Some(d) if d.starts_with("$bindable") => (bindable_default(d), true),
        Some(d) if !d.is_empty() => (Some(d.to_string()), false),
        _ => (None, false),
    };

    Some(ParsedProp { name, local_name, default_text, bindable })
}

/// Inner default of a `$bindable(...)` call, when one is given.
fn bindable_default(expr: &str) -> Option<String> {
    let open = expr.find('(')?;
    let inner = extract_balanced(expr, open)?.trim();
    (!inner.is_empty()).then(|| inner.to_string())
}

/// One field from an `interface` or object `type` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeField {
    pub name: String,
    pub type_text: String,
    pub optional: bool,
    pub description: Option<String>,
}

/// Locate the `{ … }` body of `interface Name` or `type Name = { … }`.
///
/// Generic parameter lists and `extends` clauses are scanned with type
/// delimiters so braces inside them (e.g. `Base<{ x: number }>`) do not
/// get mistaken for the body.
pub fn find_type_body<'a>(src: &'a str, name: &str) -> Option<&'a str> {
    find_declaration_body(src, "interface", name)
        .or_else(|| find_declaration_body(src, "type", name))
}

fn find_declaration_body<'a>(src: &'a str, keyword: &str, name: &str) -> Option<&'a str> {
    let mut search = 0;
    while let Some(rel) = src[search..].find(keyword) {
        let kw_at = search + rel;
        search = kw_at + keyword.len();
        if !word_bounded(src, kw_at, keyword.len()) {
            continue;
        }
        let after = &src[kw_at + keyword.len()..];
        let trimmed = after.trim_start();
        if trimmed.len() == after.len() {
            continue;
        }
        let Some(rest) = trimmed.strip_prefix(name) else { continue };
        if rest.chars().next().is_some_and(is_ident_char) {
            continue;
        }
        let name_end = src.len() - rest.len();

        let body_search = if keyword == "type" {
            let (_, eq) = read_until_unnested(src, name_end, &['='], TYPE_DELIMS);
            if eq >= src.len() {
                return None;
            }
            eq + 1
        } else {
            name_end
        };
        let (_, brace) = read_until_unnested(src, body_search, &['{'], TYPE_DELIMS);
        if brace >= src.len() {
            return None;
        }
        return extract_balanced(src, brace);
    }
    None
}

fn word_bounded(src: &str, at: usize, len: usize) -> bool {
    let before_ok = !src[..at].chars().next_back().is_some_and(is_ident_char);
    let after_ok = !src[at + len..].chars().next().is_some_and(is_ident_char);
    before_ok && after_ok
}

/// Parse the fields of an object type body (the text between its braces).
/// Method signatures and index signatures are skipped.
pub fn parse_type_fields(body: &str) -> Vec<TypeField> {
    let mut fields = Vec::new();
    let mut from = 0;
    loop {
        let (piece, stop) = read_until_unnested(body, from, &[';', ','], TYPE_DELIMS);
        if let Some(field) = parse_field_piece(piece) {
            fields.push(field);
        }
        if stop >= body.len() {
            break;
        }
        from = stop + 1;
    }
    fields
}

fn parse_field_piece(piece: &str) -> Option<TypeField> {
    let (description, rest) = leading_description(piece);
    let rest = rest.trim();
    let rest = rest.strip_prefix("readonly ").unwrap_or(rest).trim_start();
    if rest.is_empty() {
        return None;
    }

    let (lhs, colon) = read_until_unnested(rest, 0, &[':'], TYPE_DELIMS);
    if colon >= rest.len() {
        return None;
    }
    let mut name = lhs.trim();
    let optional = name.ends_with('?');
    if optional {
        name = name[..name.len() - 1].trim_end();
    }
    let name = unquote(name);
    if !is_identifier(&name) {
        return None;
    }
    let type_text = rest[colon + 1..].trim().to_string();
    if type_text.is_empty() {
        return None;
    }
    Some(TypeField { name, type_text, optional, description })
}

/// Comment text preceding a field within its own piece.
fn leading_description(piece: &str) -> (Option<String>, &str) {
    let mut rest = piece.trim_start();
    let mut parts: Vec<String> = Vec::new();
    loop {
        if rest.starts_with("/*") {
            let Some(end) = rest.find("*/") else { break };
            parts.push(clean_doc_block(&rest[..end + 2]));
            rest = rest[end + 2..].trim_start();
        } else if rest.starts_with("//") {
            let line_end = rest.find('\n').unwrap_or(rest.len());
            parts.push(clean_line_comments(&rest[..line_end]));
            rest = rest[line_end..].trim_start();
        } else {
            break;
        }
    }
    parts.retain(|p| !p.is_empty());
    let doc = (!parts.is_empty()).then(|| parts.join(" "));
    (doc, rest)
}

fn unquote(s: &str) -> String {
    let b = s.as_bytes();
    if b.len() >= 2 && (b[0] == b'\'' || b[0] == b'"') && b[b.len() - 1] == b[0] {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| is_ident_char(c) || c == '-')
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_defaults_and_renames() {
        let props = parse_destructured_props("label, size = 'md', class: className");
        assert_eq!(props.len(), 3);
        assert_eq!(props[0].name, "label");
        assert_eq!(props[0].default_text, None);
        assert_eq!(props[1].name, "size");
        assert_eq!(props[1].default_text.as_deref(), Some("'md'"));
        assert_eq!(props[2].name, "class");
        assert_eq!(props[2].local_name.as_deref(), Some("className"));
    }

    #[test]
    fn defaults_with_commas_stay_whole() {
        let props = parse_destructured_props("margin = [0, 8], onClick = () => {}, title = fn(a, b)");
        assert_eq!(props.len(), 3);
        assert_eq!(props[0].default_text.as_deref(), Some("[0, 8]"));
        assert_eq!(props[1].default_text.as_deref(), Some("() => {}"));
        assert_eq!(props[2].default_text.as_deref(), Some("fn(a, b)"));
    }

    #[test]
    fn nested_patterns_keep_only_outer_name() {
        let props = parse_destructured_props("pos: { x, y }, items = []");
        assert_eq!(props.len(), 2);
        assert_eq!(props[0].name, "pos");
        assert_eq!(props[0].local_name, None);
        assert_eq!(props[1].name, "items");
    }

    #[test]
    fn rest_spread_is_not_a_prop() {
        let props = parse_destructured_props("a, b, ...rest");
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn bindable_qualifier_detected() {
        let props = parse_destructured_props("value = $bindable(), count = $bindable(0)");
        assert!(props[0].bindable);
        assert_eq!(props[0].default_text, None);
        assert!(props[1].bindable);
        assert_eq!(props[1].default_text.as_deref(), Some("0"));
    }

    #[test]
    fn interface_body_found_past_generic_braces() {
        let src = "interface ButtonProps extends Base<{ x: number }> { label: string; }";
        let body = find_type_body(src, "ButtonProps").unwrap();
        assert!(body.contains("label: string"));
        assert!(!body.contains("x: number"));
    }

    #[test]
    fn type_alias_body_found() {
        let src = "type CardProps<T = {}> = {\n  title: string;\n  data: T;\n};";
        let body = find_type_body(src, "CardProps").unwrap();
        assert!(body.contains("title: string"));
    }

    #[test]
    fn longer_names_do_not_match() {
        let src = "interface ButtonPropsExtra { x: string }\ninterface ButtonProps { y: string }";
        let body = find_type_body(src, "ButtonProps").unwrap();
        assert!(body.contains("y: string"));
    }

    #[test]
    fn union_alias_without_object_body_is_none() {
        let src = "type Size = 'sm' | 'md' | 'lg';";
        assert_eq!(find_type_body(src, "Size"), None);
    }

    #[test]
    fn type_fields_parse_docs_optional_and_readonly() {
        let body = "\n  /** Button label. */\n  label: string;\n  size?: 'sm' | 'md';\n  readonly id: string;\n  // inline note\n  count: number;\n";
        let fields = parse_type_fields(body);
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0].name, "label");
        assert_eq!(fields[0].description.as_deref(), Some("Button label."));
        assert!(!fields[0].optional);
        assert_eq!(fields[1].name, "size");
        assert!(fields[1].optional);
        assert_eq!(fields[1].type_text, "'sm' | 'md'");
        assert_eq!(fields[2].name, "id");
        assert_eq!(fields[3].description.as_deref(), Some("inline note"));
    }

    #[test]
    fn methods_and_index_signatures_skipped() {
        let body = "render(): void; [key: string]: unknown; label: string";
        let fields = parse_type_fields(body);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "label");
    }

    #[test]
    fn generic_field_types_stay_whole() {
        let body = "lookup: Map<string, number>; handler: (e: Event) => void";
        let fields = parse_type_fields(body);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].type_text, "Map<string, number>");
        assert_eq!(fields[1].type_text, "(e: Event) => void");
    }
}
