//! Shared data model: components, tokens, signals, drift findings, scan
//! results. Immutable value records, recomputed on every scan; persistence
//! is an external collaborator's job.

pub mod collections;
pub mod compare;
pub mod component;
pub mod drift;
pub mod identity;
pub mod scan;
pub mod signal;
pub mod token;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time as milliseconds since the Unix epoch.
/// Used for `scanned_at` / `detected_at` stamps on value records.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
