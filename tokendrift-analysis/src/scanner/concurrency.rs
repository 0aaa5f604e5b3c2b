//! Worker pool sizing.

use tokendrift_core::constants::{DEFAULT_CONCURRENCY, MAX_CONCURRENCY};

/// Pick a worker count for a scan of `file_count` files.
///
/// An explicit configured value wins, clamped to `1..=MAX_CONCURRENCY`.
/// Otherwise the size adapts to the batch: small batches get a few
/// workers so thread startup does not dominate, large batches scale up
/// to the hard cap.
pub fn adaptive_concurrency(file_count: usize, configured: Option<usize>) -> usize {
    if let Some(n) = configured {
        return n.clamp(1, MAX_CONCURRENCY);
    }
    match file_count {
        0..=20 => 4,
        21..=200 => DEFAULT_CONCURRENCY,
        201..=1000 => 25,
        _ => MAX_CONCURRENCY,
    }
}
