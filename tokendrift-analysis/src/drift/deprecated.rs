//! Deprecated components that other components still render.

use tokendrift_core::types::collections::FxHashMap;
use tokendrift_core::types::component::Component;
use tokendrift_core::types::drift::{DriftKind, DriftSignal, DriftSource, Severity};

/// One finding per live component that depends on a deprecated one.
///
/// Dependencies hold names as the source wrote them, so custom-element
/// tags recorded in metadata resolve to their class as well. Deprecated
/// components using each other are not reported; those findings would
/// vanish with the components themselves.
pub fn check(components: &[Component]) -> Vec<DriftSignal> {
    let mut deprecated: FxHashMap<&str, &Component> = FxHashMap::default();
    for component in components.iter().filter(|c| c.metadata.deprecated) {
        deprecated.insert(component.name.as_str(), component);
        for tag in component.metadata.tags.iter() {
            if let Some(tag) = tag.strip_prefix("tag:") {
                deprecated.insert(tag, component);
            }
        }
    }
    if deprecated.is_empty() {
        return Vec::new();
    }

    let mut findings = Vec::new();
    for user in components.iter().filter(|c| !c.metadata.deprecated) {
        for dependency in &user.dependencies {
            let Some(target) = deprecated.get(dependency.as_str()) else { continue };
            if target.id == user.id {
                continue;
            }
            let source = DriftSource::component(&user.id, &user.name, user.source.path.clone())
                .at_line(user.source.line);
            findings.push(
                DriftSignal::new(
                    DriftKind::DeprecatedUsage,
                    Severity::Warning,
                    source,
                    format!("`{}` renders deprecated `{}`", user.name, target.name),
                )
                .with_related(vec![target.name.clone()]),
            );
        }
    }
    findings
}
