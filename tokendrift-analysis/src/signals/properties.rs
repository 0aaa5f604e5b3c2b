//! Property classification for style observations.

use std::sync::LazyLock;

use regex::Regex;
use tokendrift_core::types::signal::SignalKind;

/// Properties whose values are colors.
const COLOR_PROPERTIES: &[&str] = &[
    "color",
    "background",
    "background-color",
    "border-color",
    "border-top-color",
    "border-right-color",
    "border-bottom-color",
    "border-left-color",
    "outline-color",
    "fill",
    "stroke",
    "caret-color",
    "accent-color",
    "text-decoration-color",
];

/// Properties whose values are lengths in the spacing scale.
const SPACING_PROPERTIES: &[&str] = &[
    "margin",
    "margin-top",
    "margin-right",
    "margin-bottom",
    "margin-left",
    "padding",
    "padding-top",
    "padding-right",
    "padding-bottom",
    "padding-left",
    "gap",
    "row-gap",
    "column-gap",
    "inset",
    "top",
    "right",
    "bottom",
    "left",
];

/// Identifier paths like `theme.colors.primary` or `tokens.space.md`.
static THEME_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][\w$]*(\.[\w-]+)+$").expect("theme path regex"));

/// Lowercase a property name and convert camelCase to kebab-case, so
/// `backgroundColor` and `background-color` classify identically.
pub fn canonical_property(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    for ch in property.trim().chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else if ch == '_' {
            out.push('-');
        } else {
            out.push(ch);
        }
    }
    out
}

/// Map a property name to the signal kind its values carry.
pub fn classify_property(property: &str) -> Option<SignalKind> {
    let canonical = canonical_property(property);
    match canonical.as_str() {
        "font-size" => Some(SignalKind::FontSize),
        "font-family" => Some(SignalKind::FontFamily),
        "font-weight" => Some(SignalKind::FontWeight),
        p if COLOR_PROPERTIES.contains(&p) => Some(SignalKind::ColorValue),
        p if SPACING_PROPERTIES.contains(&p) => Some(SignalKind::SpacingValue),
        _ => None,
    }
}

/// Whether a value already references a design token rather than
/// hardcoding one: `var(--x)`, preprocessor variables, custom property
/// names, theme paths, or anything mentioning "token".
pub fn is_token_reference(value: &str) -> bool {
    let value = value.trim();
    value.starts_with("var(")
        || value.starts_with('$')
        || value.starts_with("--")
        || THEME_PATH.is_match(value)
        || value.to_ascii_lowercase().contains("token")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_folds_to_kebab() {
        assert_eq!(canonical_property("backgroundColor"), "background-color");
        assert_eq!(canonical_property("marginTop"), "margin-top");
        assert_eq!(canonical_property("color"), "color");
        assert_eq!(canonical_property("font_size"), "font-size");
    }

    #[test]
    fn classification_covers_the_three_families() {
        assert_eq!(classify_property("color"), Some(SignalKind::ColorValue));
        assert_eq!(classify_property("borderColor"), Some(SignalKind::ColorValue));
        assert_eq!(classify_property("padding"), Some(SignalKind::SpacingValue));
        assert_eq!(classify_property("rowGap"), Some(SignalKind::SpacingValue));
        assert_eq!(classify_property("fontSize"), Some(SignalKind::FontSize));
        assert_eq!(classify_property("font-family"), Some(SignalKind::FontFamily));
        assert_eq!(classify_property("fontWeight"), Some(SignalKind::FontWeight));
        assert_eq!(classify_property("display"), None);
        assert_eq!(classify_property("z-index"), None);
    }

    #[test]
    fn token_references_detected() {
        assert!(is_token_reference("var(--color-primary)"));
        assert!(is_token_reference("$spacing-md"));
        assert!(is_token_reference("--color-primary"));
        assert!(is_token_reference("theme.colors.primary"));
        assert!(is_token_reference("tokens.space.4"));
        assert!(is_token_reference("designToken.blue"));
        assert!(!is_token_reference("#3366ff"));
        assert!(!is_token_reference("16px"));
        assert!(!is_token_reference("1.5"));
    }
}
