//! Documentation drift: components with no docs anywhere.

use tokendrift_core::types::component::Component;
use tokendrift_core::types::drift::{DriftKind, DriftSignal, DriftSource, Severity};

/// Informational finding when neither the component nor any of its
/// props carries documentation.
pub fn check(component: &Component) -> Option<DriftSignal> {
    if component.metadata.documented {
        return None;
    }
    if component.props.iter().any(|p| p.description.is_some()) {
        return None;
    }
    let source =
        DriftSource::component(&component.id, &component.name, component.source.path.clone())
            .at_line(component.source.line);
    Some(DriftSignal::new(
        DriftKind::Documentation,
        Severity::Info,
        source,
        format!("`{}` has no documentation", component.name),
    ))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tokendrift_core::types::component::{ComponentSource, Dialect, PropDefinition};

    use super::*;

    fn bare(name: &str) -> Component {
        Component::new(
            name,
            ComponentSource {
                dialect: Dialect::Svelte,
                path: PathBuf::from(format!("src/{name}.svelte")),
                exported_as: None,
                line: 3,
            },
        )
    }

    #[test]
    fn undocumented_component_is_flagged() {
        let finding = check(&bare("Badge")).unwrap();
        assert_eq!(finding.severity, Severity::Info);
        assert_eq!(finding.source.line, Some(3));
    }

    #[test]
    fn doc_comment_clears_the_finding() {
        let mut c = bare("Badge");
        c.metadata.documented = true;
        assert!(check(&c).is_none());
    }

    #[test]
    fn a_single_prop_description_clears_the_finding() {
        let mut c = bare("Badge");
        c.props.push(PropDefinition {
            name: "size".into(),
            description: Some("Badge diameter in px".into()),
            ..PropDefinition::default()
        });
        assert!(check(&c).is_none());
    }
}
