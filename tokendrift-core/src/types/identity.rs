//! Deterministic entity identities.
//!
//! Every record the scanner produces is keyed by an id derived from its
//! defining facts, so re-scanning unchanged source yields byte-identical
//! ids and both diffing and caching can key on them.

use xxhash_rust::xxh3::xxh3_64;

/// Separator between id parts. Unit separator cannot appear in paths or
/// names, so `("a", "bc")` and `("ab", "c")` hash differently.
const SEP: &str = "\u{1f}";

fn stable_id(prefix: &str, parts: &[&str]) -> String {
    let joined = parts.join(SEP);
    format!("{prefix}-{:016x}", xxh3_64(joined.as_bytes()))
}

/// Component id from its source path and exported/derived name.
pub fn component_id(path: &str, name: &str) -> String {
    stable_id("cmp", &[path, name])
}

/// Design-token id from its source path and dotted name.
pub fn token_id(path: &str, name: &str) -> String {
    stable_id("tok", &[path, name])
}

/// Signal id from (kind, file, line, value), so identical repeated
/// observations collapse to one id.
pub fn signal_id(kind: &str, file: &str, line: u32, value: &str) -> String {
    stable_id("sig", &[kind, file, &line.to_string(), value])
}

/// Drift-finding id from (kind, entity id, value-or-message key).
pub fn drift_id(kind: &str, entity: &str, key: &str) -> String {
    stable_id("drift", &[kind, entity, key])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_deterministic() {
        assert_eq!(
            component_id("src/Button.tsx", "Button"),
            component_id("src/Button.tsx", "Button")
        );
    }

    #[test]
    fn ids_differ_by_part() {
        assert_ne!(
            component_id("src/Button.tsx", "Button"),
            component_id("src/Button.tsx", "IconButton")
        );
        assert_ne!(
            component_id("src/a/Button.tsx", "Button"),
            component_id("src/b/Button.tsx", "Button")
        );
    }

    #[test]
    fn part_boundaries_are_unambiguous() {
        assert_ne!(signal_id("color-value", "a.css", 1, "#fff"), signal_id("color-value", "a.css1", 1, "#fff"));
    }

    #[test]
    fn prefixes_namespace_ids() {
        let c = component_id("x", "y");
        let t = token_id("x", "y");
        assert!(c.starts_with("cmp-"));
        assert!(t.starts_with("tok-"));
        // Same parts hash identically; the prefix disambiguates entity kinds.
        assert_eq!(&c[4..], &t[4..]);
        assert_ne!(c, t);
    }
}
