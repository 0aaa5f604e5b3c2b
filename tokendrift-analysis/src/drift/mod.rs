//! Drift detection: classified findings over scanned components, the
//! token library, and file-level signals.

mod deprecated;
mod documentation;
mod engine;
mod hardcoded;
mod naming;
mod sprawl;

pub use engine::{rank_drifts, DriftAnalyzer};
pub use naming::canonical_key;
pub use sprawl::check_framework_sprawl;
