//! Component naming from file paths.

use std::path::Path;

/// Derive a component name from a file stem: split on `-`, `_`, `.` and
/// spaces, capitalize each segment, concatenate.
///
/// `my-button.svelte` becomes `MyButton`, `date_picker.component.html`
/// becomes `DatePickerComponent`.
pub fn component_name_from_path(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    component_name_from_stem(stem)
}

/// Same derivation for a pre-extracted stem, for callers that strip
/// multi-part extensions themselves.
pub fn component_name_from_stem(stem: &str) -> String {
    stem.split(['-', '_', '.', ' '])
        .filter(|seg| !seg.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(seg: &str) -> String {
    let mut chars = seg.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn stems_become_pascal_case() {
        let cases = [
            ("src/my-button.svelte", "MyButton"),
            ("lib/date_picker.vue", "DatePicker"),
            ("Button.tsx", "Button"),
            ("card.component.html", "CardComponent"),
            ("tabGroup.ts", "TabGroup"),
        ];
        for (path, expected) in cases {
            assert_eq!(component_name_from_path(&PathBuf::from(path)), expected, "{path}");
        }
    }
}
