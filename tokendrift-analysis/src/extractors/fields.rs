//! Class-field parsing for the decorator-based dialects, plus prop
//! merging shared by every dialect that backfills from type bodies.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use tokendrift_core::types::component::PropDefinition;

use crate::parsing::balanced::{
    extract_balanced, matching_close, read_until_unnested, split_top_level, CODE_DELIMS,
    TYPE_DELIMS,
};
use crate::parsing::props::{ParsedProp, TypeField};

use super::style_values::offset_in;

static CLASS_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A\s*(?:(export)\s+)?(?:default\s+)?class\s+([A-Za-z_$][\w$]*)")
        .expect("class declaration pattern")
});

static CLASS_ANY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:(export)\s+)?(?:default\s+)?class\s+([A-Za-z_$][\w$]*)")
        .expect("class scan pattern")
});

/// One parsed class field following a decorator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClassField {
    pub name: String,
    pub optional: bool,
    pub type_text: Option<String>,
    pub default_text: Option<String>,
    /// Byte offset of the field name in the scanned source.
    pub offset: usize,
}

/// Offsets of `decorator` occurrences that are not a prefix of a longer
/// decorator name.
pub(crate) fn decorator_offsets(src: &str, decorator: &str) -> Vec<usize> {
    src.match_indices(decorator)
        .filter(|(at, _)| {
            !src[at + decorator.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '.')
        })
        .map(|(at, _)| at)
        .collect()
}

/// Arguments of a decorator whose `@` sits at `at`. Returns the argument
/// text (without parentheses) and the offset just past the call, or past
/// the decorator name when it has no call.
pub(crate) fn decorator_args(src: &str, at: usize) -> (Option<&str>, usize) {
    let bytes = src.as_bytes();
    let mut end = at + 1;
    while end < src.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'.') {
        end += 1;
    }
    let mut probe = end;
    while probe < src.len() && bytes[probe].is_ascii_whitespace() {
        probe += 1;
    }
    if probe < src.len() && bytes[probe] == b'(' {
        if let (Some(args), Some(close)) = (extract_balanced(src, probe), matching_close(src, probe))
        {
            return (Some(args), close + 1);
        }
    }
    (None, end)
}

/// Parse the class field declared after `from` (just past a decorator).
/// Modifiers (`public`, `readonly`, `static`, …) are skipped; the type
/// annotation and default are read with balanced scanning so generics
/// and multi-line initializers survive.
pub(crate) fn field_after(src: &str, from: usize) -> Option<ClassField> {
    let bytes = src.as_bytes();
    let mut i = from;
    loop {
        while i < src.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let word_len = leading_ident_len(&src[i..])?;
        let word = &src[i..i + word_len];
        if matches!(
            word,
            "public" | "private" | "protected" | "readonly" | "static" | "declare" | "accessor"
                | "override"
        ) {
            i += word_len;
            continue;
        }

        let offset = i;
        let name = word.to_string();
        i += word_len;
        let mut optional = false;
        if bytes.get(i) == Some(&b'?') {
            optional = true;
            i += 1;
        }
        if bytes.get(i) == Some(&b'!') {
            i += 1;
        }
        while i < src.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
            i += 1;
        }

        let mut type_text = None;
        if bytes.get(i) == Some(&b':') {
            let (t, stop) = read_until_unnested(src, i + 1, &['=', ';', '\n'], TYPE_DELIMS);
            let t = t.trim();
            if !t.is_empty() {
                type_text = Some(t.to_string());
            }
            i = stop;
        }

        let mut default_text = None;
        if bytes.get(i) == Some(&b'=') {
            let (d, _) = read_until_unnested(src, i + 1, &[';', '\n'], CODE_DELIMS);
            let d = d.trim();
            if !d.is_empty() {
                default_text = Some(d.to_string());
            }
        }

        return Some(ClassField { name, optional, type_text, default_text, offset });
    }
}

/// The class declaration directly following `from` (just past a class
/// decorator): name, whether it is exported, and the offset past the
/// name.
pub(crate) fn class_declaration_after(src: &str, from: usize) -> Option<(String, bool, usize)> {
    let caps = CLASS_DECL.captures(&src[from..])?;
    let name = caps.get(2)?;
    Some((name.as_str().to_string(), caps.get(1).is_some(), from + name.end()))
}

/// One line-leading class declaration found by a whole-file scan.
pub(crate) struct ClassDecl {
    pub name: String,
    pub exported: bool,
    pub name_start: usize,
    pub name_end: usize,
}

/// Every line-leading class declaration in `src`, for dialects that
/// detect components by base class rather than by decorator.
pub(crate) fn class_declarations(src: &str) -> Vec<ClassDecl> {
    CLASS_ANY
        .captures_iter(src)
        .filter_map(|caps| {
            let name = caps.get(2)?;
            Some(ClassDecl {
                name: name.as_str().to_string(),
                exported: caps.get(1).is_some(),
                name_start: name.start(),
                name_end: name.end(),
            })
        })
        .collect()
}

/// Heritage and body byte ranges for a class whose name ends at
/// `name_end`. None when the opening brace is missing or unbalanced.
pub(crate) fn class_extents(src: &str, name_end: usize) -> Option<(Range<usize>, Range<usize>)> {
    let (_, brace) = read_until_unnested(src, name_end, &['{'], TYPE_DELIMS);
    if brace >= src.len() {
        return None;
    }
    let body = extract_balanced(src, brace)?;
    let start = offset_in(src, body);
    Some((name_end..brace, start..start + body.len()))
}

/// Raw value text of `key` in an object literal (outer braces optional).
pub(crate) fn object_entry<'a>(object: &'a str, key: &str) -> Option<&'a str> {
    let trimmed = object.trim_start();
    let inner = if trimmed.starts_with('{') {
        extract_balanced(object, object.len() - trimmed.len())?
    } else {
        object
    };
    for piece in split_top_level(inner, ',', CODE_DELIMS) {
        let (k, colon) = read_until_unnested(piece, 0, &[':'], CODE_DELIMS);
        if colon < piece.len() && k.trim() == key {
            let v = piece[colon + 1..].trim();
            return (!v.is_empty()).then_some(v);
        }
    }
    None
}

/// Value of `key` when it is a quoted string, with the quotes removed.
pub(crate) fn object_string_entry<'a>(object: &'a str, key: &str) -> Option<&'a str> {
    let v = object_entry(object, key)?;
    string_literal(v)
}

/// Inner text of a quoted string literal.
pub(crate) fn string_literal(text: &str) -> Option<&str> {
    let t = text.trim();
    let b = t.as_bytes();
    (b.len() >= 2 && matches!(b[0], b'\'' | b'"' | b'`') && b[b.len() - 1] == b[0])
        .then(|| &t[1..t.len() - 1])
}

fn leading_ident_len(s: &str) -> Option<usize> {
    let mut len = 0;
    for (idx, c) in s.char_indices() {
        let ok = if idx == 0 {
            c.is_ascii_alphabetic() || c == '_' || c == '$'
        } else {
            c.is_ascii_alphanumeric() || c == '_' || c == '$'
        };
        if !ok {
            break;
        }
        len = idx + c.len_utf8();
    }
    (len > 0).then_some(len)
}

/// Turn a destructured binding into a prop definition.
pub(crate) fn prop_from_parsed(p: ParsedProp) -> PropDefinition {
    PropDefinition {
        name: p.name,
        type_text: None,
        required: p.default_text.is_none() && !p.bindable,
        default_text: p.default_text,
        description: None,
        bindable: p.bindable,
    }
}

/// Turn a class field into a prop definition.
pub(crate) fn prop_from_field(f: &ClassField) -> PropDefinition {
    PropDefinition {
        name: f.name.clone(),
        type_text: f.type_text.clone(),
        required: !f.optional && f.default_text.is_none(),
        default_text: f.default_text.clone(),
        description: None,
        bindable: false,
    }
}

/// Backfill props from type fields. Existing entries only gain what they
/// lack (an explicit type is never overwritten); fields absent from the
/// explicit list are appended.
pub(crate) fn merge_type_fields(props: &mut Vec<PropDefinition>, fields: Vec<TypeField>) {
    for field in fields {
        if let Some(existing) = props.iter_mut().find(|p| p.name == field.name) {
            if existing.type_text.is_none() {
                existing.type_text = Some(field.type_text);
            }
            if existing.description.is_none() {
                existing.description = field.description;
            }
            existing.required = !field.optional && existing.default_text.is_none();
        } else {
            props.push(PropDefinition {
                name: field.name,
                type_text: Some(field.type_text),
                required: !field.optional,
                default_text: None,
                description: field.description,
                bindable: false,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decorator_args_extracted_past_nesting() {
        let src = "@Component({ tag: 'my-button', styles: { a: 1 } })\nexport class B {}";
        let (args, end) = decorator_args(src, 0);
        assert_eq!(args, Some("{ tag: 'my-button', styles: { a: 1 } }"));
        assert_eq!(&src[end..end + 1], "\n");
    }

    #[test]
    fn bare_decorator_has_no_args() {
        let src = "@observable name = '';";
        let (args, end) = decorator_args(src, 0);
        assert_eq!(args, None);
        assert_eq!(end, "@observable".len());
    }

    #[test]
    fn fields_parse_modifiers_types_and_defaults() {
        let src = "@Prop() readonly size: 'sm' | 'lg' = 'sm';";
        let (_, end) = decorator_args(src, 0);
        let field = field_after(src, end).unwrap();
        assert_eq!(field.name, "size");
        assert_eq!(field.type_text.as_deref(), Some("'sm' | 'lg'"));
        assert_eq!(field.default_text.as_deref(), Some("'sm'"));
        assert!(!field.optional);
    }

    #[test]
    fn optional_marker_and_generic_types() {
        let src = "@property() items?: Map<string, number>;";
        let (_, end) = decorator_args(src, 0);
        let field = field_after(src, end).unwrap();
        assert_eq!(field.name, "items");
        assert!(field.optional);
        assert_eq!(field.type_text.as_deref(), Some("Map<string, number>"));
        assert_eq!(field.default_text, None);
    }

    #[test]
    fn multi_line_object_default_survives() {
        let src = "@Prop() config = {\n  a: 1,\n  b: 2,\n};";
        let (_, end) = decorator_args(src, 0);
        let field = field_after(src, end).unwrap();
        assert_eq!(field.default_text.as_deref(), Some("{\n  a: 1,\n  b: 2,\n}"));
    }

    #[test]
    fn merge_never_overwrites_explicit_types() {
        let mut props = vec![PropDefinition {
            name: "size".into(),
            type_text: Some("Size".into()),
            required: true,
            ..PropDefinition::default()
        }];
        merge_type_fields(
            &mut props,
            vec![
                TypeField {
                    name: "size".into(),
                    type_text: "'sm' | 'lg'".into(),
                    optional: true,
                    description: Some("Visual size.".into()),
                },
                TypeField {
                    name: "label".into(),
                    type_text: "string".into(),
                    optional: false,
                    description: None,
                },
            ],
        );
        assert_eq!(props.len(), 2);
        assert_eq!(props[0].type_text.as_deref(), Some("Size"));
        assert_eq!(props[0].description.as_deref(), Some("Visual size."));
        assert!(!props[0].required);
        assert_eq!(props[1].name, "label");
        assert!(props[1].required);
    }

    #[test]
    fn class_declaration_follows_decorator() {
        let src = "@customElement('x-btn')\nexport class XButton extends LitElement {}";
        let (_, end) = decorator_args(src, 0);
        let (name, exported, name_end) = class_declaration_after(src, end).unwrap();
        assert_eq!(name, "XButton");
        assert!(exported);
        assert!(src[name_end..].starts_with(" extends"));
    }

    #[test]
    fn unexported_class_detected() {
        let src = "@customElement('x-i')\nclass XI extends LitElement {}";
        let (_, end) = decorator_args(src, 0);
        let (name, exported, _) = class_declaration_after(src, end).unwrap();
        assert_eq!(name, "XI");
        assert!(!exported);
    }

    #[test]
    fn class_extents_cover_heritage_and_body() {
        let src = "class A extends Base {\n  x = 1;\n}";
        let (name, _, name_end) = class_declaration_after(src, 0).unwrap();
        assert_eq!(name, "A");
        let (heritage, body) = class_extents(src, name_end).unwrap();
        assert_eq!(src[heritage].trim(), "extends Base");
        assert_eq!(src[body].trim(), "x = 1;");
    }

    #[test]
    fn object_entries_looked_up_at_top_level() {
        let obj = "{ tag: 'my-button', type: Number, nested: { tag: 'inner' } }";
        assert_eq!(object_string_entry(obj, "tag"), Some("my-button"));
        assert_eq!(object_entry(obj, "type"), Some("Number"));
        assert_eq!(object_string_entry(obj, "type"), None);
        assert_eq!(object_entry(obj, "missing"), None);
    }

    #[test]
    fn multi_line_string_values_keep_their_slice() {
        let obj = "{\n  styles: `\n    :host { color: red; }\n  `,\n}";
        let css = object_string_entry(obj, "styles").unwrap();
        assert!(css.contains(":host"));
        assert!(!css.contains('`'));
    }
}
