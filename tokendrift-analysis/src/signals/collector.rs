//! Per-file signal collection.

use std::path::PathBuf;

use tokendrift_core::types::collections::FxHashSet;
use tokendrift_core::types::signal::{RawSignal, SignalContext, SignalKind, SignalScope};

use crate::normalize::{normalize_color, normalize_spacing};

use super::properties::{canonical_property, classify_property, is_token_reference};

/// Collects raw signals for one file.
///
/// Each worker owns its collector for the duration of a file, so no
/// locking happens while extraction runs. Identical observations (same
/// kind, line, and value) collapse to a single signal.
#[derive(Debug)]
pub struct SignalCollector {
    file: PathBuf,
    context: SignalContext,
    signals: Vec<RawSignal>,
    seen: FxHashSet<String>,
}

impl SignalCollector {
    pub fn new(file: impl Into<PathBuf>, context: SignalContext) -> Self {
        Self {
            file: file.into(),
            context,
            signals: Vec::new(),
            seen: FxHashSet::default(),
        }
    }

    /// Change the lexical scope recorded on subsequent signals.
    pub fn set_scope(&mut self, scope: SignalScope) {
        self.context.scope = scope;
    }

    /// Classify a property/value pair and record the matching signal.
    ///
    /// Values that already reference a token are not observations of
    /// drift and record nothing. Properties outside the fixed membership
    /// sets fall back to sniffing the value: colors first, then spacing,
    /// otherwise silence.
    pub fn collect_from_value(&mut self, property: &str, value: &str, line: u32) {
        let value = value.trim();
        if value.is_empty() || is_token_reference(value) {
            return;
        }

        let kind = match classify_property(property) {
            Some(kind) => kind,
            None => {
                if normalize_color(value).is_some() {
                    SignalKind::ColorValue
                } else if normalize_spacing(value).is_some() {
                    SignalKind::SpacingValue
                } else {
                    return;
                }
            }
        };

        self.push(
            RawSignal::new(kind, value, &self.file, line, 0, self.context.clone())
                .with_meta("property", canonical_property(property)),
        );
    }

    /// Record a component definition.
    pub fn collect_component_def(&mut self, name: &str, line: u32) {
        self.push(RawSignal::new(
            SignalKind::ComponentDef,
            name,
            &self.file,
            line,
            0,
            self.context.clone(),
        ));
    }

    /// Record a usage of another component.
    pub fn collect_component_usage(&mut self, name: &str, line: u32) {
        self.push(RawSignal::new(
            SignalKind::ComponentUsage,
            name,
            &self.file,
            line,
            0,
            self.context.clone(),
        ));
    }

    /// Record a token definition with its raw value.
    pub fn collect_token_def(&mut self, name: &str, value: &str, line: u32) {
        let mut context = self.context.clone();
        context.tokenized = true;
        self.push(
            RawSignal::new(SignalKind::TokenDefinition, name, &self.file, line, 0, context)
                .with_meta("value", value),
        );
    }

    /// Record a reference to a token (`var(--x)`, theme path).
    pub fn collect_token_usage(&mut self, name: &str, line: u32) {
        let mut context = self.context.clone();
        context.tokenized = true;
        self.push(RawSignal::new(
            SignalKind::TokenUsage,
            name,
            &self.file,
            line,
            0,
            context,
        ));
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn into_signals(self) -> Vec<RawSignal> {
        self.signals
    }

    fn push(&mut self, signal: RawSignal) {
        if self.seen.insert(signal.id.clone()) {
            self.signals.push(signal);
        }
    }
}

#[cfg(test)]
mod tests {
    use tokendrift_core::types::component::Dialect;

    use super::*;

    fn collector() -> SignalCollector {
        SignalCollector::new("src/Button.tsx", SignalContext::for_dialect(Dialect::React))
    }

    #[test]
    fn classifies_by_property_membership() {
        let mut c = collector();
        c.collect_from_value("color", "#3366ff", 4);
        c.collect_from_value("padding", "8px", 5);
        c.collect_from_value("fontWeight", "700", 6);

        let signals = c.into_signals();
        assert_eq!(signals.len(), 3);
        assert_eq!(signals[0].kind, SignalKind::ColorValue);
        assert_eq!(signals[1].kind, SignalKind::SpacingValue);
        assert_eq!(signals[2].kind, SignalKind::FontWeight);
        assert_eq!(signals[0].metadata.get("property").map(String::as_str), Some("color"));
    }

    #[test]
    fn token_references_record_nothing() {
        let mut c = collector();
        c.collect_from_value("color", "var(--color-primary)", 4);
        c.collect_from_value("padding", "$spacing-md", 5);
        c.collect_from_value("margin", "theme.space.4", 6);
        assert!(c.is_empty());
    }

    #[test]
    fn unknown_property_sniffs_value() {
        let mut c = collector();
        c.collect_from_value("--brand", "#ff0000", 2);
        c.collect_from_value("scroll-margin", "12px", 3);
        c.collect_from_value("display", "flex", 4);

        let signals = c.into_signals();
        assert_eq!(signals.len(), 2);
        assert_eq!(signals[0].kind, SignalKind::ColorValue);
        assert_eq!(signals[1].kind, SignalKind::SpacingValue);
    }

    #[test]
    fn duplicate_observations_collapse() {
        let mut c = collector();
        c.collect_from_value("color", "#fff", 4);
        c.collect_from_value("color", "#fff", 4);
        c.collect_from_value("color", "#fff", 9);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn token_definitions_are_marked_tokenized() {
        let mut c = collector();
        c.collect_token_def("--color-primary", "#3366ff", 1);
        let signals = c.into_signals();
        assert!(signals[0].context.tokenized);
        assert_eq!(signals[0].metadata.get("value").map(String::as_str), Some("#3366ff"));
    }
}
