//! Naming drift: component names that nearly duplicate one another.

use tokendrift_core::constants::NAMING_DRIFT_THRESHOLD;
use tokendrift_core::types::component::Component;
use tokendrift_core::types::drift::{DriftKind, DriftSignal, DriftSource, Severity};

use crate::compare::{name_similarity, normalize_name};

/// Canonical comparison key for a component name.
///
/// Strips one abstraction prefix (`I` before an uppercase letter,
/// `Abstract`, `Base`) and one role suffix (`Component`, `View`,
/// `Container`, `Wrapper`), then lowers the rest and drops separators.
pub fn canonical_key(name: &str) -> String {
    let mut core = name;
    if let Some(rest) = core.strip_prefix("Abstract") {
        if !rest.is_empty() {
            core = rest;
        }
    } else if let Some(rest) = core.strip_prefix("Base") {
        if !rest.is_empty() {
            core = rest;
        }
    } else if let Some(rest) = core.strip_prefix('I') {
        if rest.starts_with(|c: char| c.is_ascii_uppercase()) {
            core = rest;
        }
    }
    for suffix in ["Component", "View", "Container", "Wrapper"] {
        if let Some(rest) = core.strip_suffix(suffix) {
            if !rest.is_empty() {
                core = rest;
                break;
            }
        }
    }
    normalize_name(core)
}

/// One finding per offending pair, reported on the later component.
///
/// Two distinct raw names violate the convention when their canonical
/// keys are identical or nearly so.
pub fn check(components: &[Component]) -> Vec<DriftSignal> {
    let keys: Vec<String> = components.iter().map(|c| canonical_key(&c.name)).collect();
    let mut findings = Vec::new();
    for (i, later) in components.iter().enumerate() {
        for (j, earlier) in components[..i].iter().enumerate() {
            if earlier.id == later.id || earlier.name == later.name {
                continue;
            }
            let close =
                keys[i] == keys[j] || name_similarity(&keys[i], &keys[j]) >= NAMING_DRIFT_THRESHOLD;
            if !close {
                continue;
            }
            let source = DriftSource::component(&later.id, &later.name, later.source.path.clone())
                .at_line(later.source.line);
            findings.push(
                DriftSignal::new(
                    DriftKind::Naming,
                    Severity::Warning,
                    source,
                    format!("`{}` nearly duplicates `{}`", later.name, earlier.name),
                )
                .with_related(vec![earlier.name.clone()]),
            );
        }
    }
    findings
}
