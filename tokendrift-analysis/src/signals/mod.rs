//! Raw signal collection: extractors record positional style
//! observations through a per-file `SignalCollector`, and the substrate
//! merges collectors into a `SignalAggregator` after the parallel phase.

pub mod aggregator;
pub mod collector;
pub mod properties;

pub use aggregator::SignalAggregator;
pub use collector::SignalCollector;
pub use properties::{canonical_property, classify_property, is_token_reference};
