//! Framework sprawl: more than one UI framework in the same tree.

use tokendrift_core::types::drift::{DriftKind, DriftSignal, DriftSource, Severity};

/// Single warning naming every detected framework, or nothing when the
/// project sticks to one.
pub fn check_framework_sprawl(frameworks: &[String]) -> Option<DriftSignal> {
    let mut names: Vec<String> = frameworks.to_vec();
    names.sort();
    names.dedup();
    if names.len() < 2 {
        return None;
    }
    Some(
        DriftSignal::new(
            DriftKind::FrameworkSprawl,
            Severity::Warning,
            DriftSource::project("frameworks"),
            format!("{} UI frameworks in one project: {}", names.len(), names.join(", ")),
        )
        .with_related(names),
    )
}
