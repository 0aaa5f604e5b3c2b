//! Hardcoded style values: literals that should be token references.

use tokendrift_core::types::component::Component;
use tokendrift_core::types::drift::{DriftKind, DriftSignal, DriftSource, Severity, TokenSuggestion};
use tokendrift_core::types::signal::{RawSignal, SignalKind, SignalScope};
use tokendrift_core::types::token::DesignToken;

use crate::compare::suggest_tokens;

/// Findings for every literal style value recorded on `component`.
///
/// A value with at least one token suggestion becomes a warning carrying
/// the ranked suggestions; a value with none stays informational.
pub fn check_component(
    component: &Component,
    tokens: &[DesignToken],
    min_confidence: f64,
    max_suggestions: usize,
) -> Vec<DriftSignal> {
    component
        .metadata
        .hardcoded_values
        .iter()
        .map(|hardcoded| {
            let suggestions =
                suggest_tokens(&hardcoded.value, tokens, min_confidence, max_suggestions);
            let source = DriftSource::component(
                &component.id,
                &component.name,
                component.source.path.clone(),
            )
            .at_line(hardcoded.line);
            finding(source, &hardcoded.property, &hardcoded.value, suggestions)
        })
        .collect()
}

/// Findings for top-level stylesheet values outside any component.
///
/// Only global-scope color and spacing observations count; values that
/// already reference a token are never hardcoded.
pub fn check_signals(
    signals: &[RawSignal],
    tokens: &[DesignToken],
    min_confidence: f64,
    max_suggestions: usize,
) -> Vec<DriftSignal> {
    signals
        .iter()
        .filter(|signal| {
            matches!(signal.kind, SignalKind::ColorValue | SignalKind::SpacingValue)
                && signal.context.scope == SignalScope::Global
                && !signal.context.tokenized
        })
        .map(|signal| {
            let suggestions = suggest_tokens(&signal.value, tokens, min_confidence, max_suggestions);
            let property = signal.metadata.get("property").map(String::as_str).unwrap_or("value");
            let source = DriftSource::file(signal.file.clone()).at_line(signal.line);
            finding(source, property, &signal.value, suggestions)
        })
        .collect()
}

fn finding(
    source: DriftSource,
    property: &str,
    value: &str,
    suggestions: Vec<TokenSuggestion>,
) -> DriftSignal {
    let severity = if suggestions.is_empty() { Severity::Info } else { Severity::Warning };
    let message = format!("hardcoded {property} `{value}`");
    let signal = DriftSignal::new(DriftKind::HardcodedValue, severity, source, message);
    if suggestions.is_empty() {
        signal
    } else {
        signal.with_suggestions(suggestions)
    }
}
