//! Cross-file signal aggregation.

use tokendrift_core::types::collections::{FxHashMap, FxHashSet};
use tokendrift_core::types::signal::{RawSignal, SignalKind};

/// Merges per-file signal batches after the parallel phase.
///
/// Deduplicates by signal id, so re-scanned or cache-replayed files do
/// not double-count observations.
#[derive(Debug, Default)]
pub struct SignalAggregator {
    signals: Vec<RawSignal>,
    seen: FxHashSet<String>,
}

impl SignalAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb a batch of signals, dropping ids already present.
    pub fn merge(&mut self, batch: impl IntoIterator<Item = RawSignal>) {
        for signal in batch {
            if self.seen.insert(signal.id.clone()) {
                self.signals.push(signal);
            }
        }
    }

    pub fn total(&self) -> usize {
        self.signals.len()
    }

    pub fn counts_by_kind(&self) -> FxHashMap<SignalKind, usize> {
        let mut counts = FxHashMap::default();
        for signal in &self.signals {
            *counts.entry(signal.kind).or_insert(0) += 1;
        }
        counts
    }

    pub fn signals(&self) -> &[RawSignal] {
        &self.signals
    }

    pub fn into_signals(self) -> Vec<RawSignal> {
        self.signals
    }
}
