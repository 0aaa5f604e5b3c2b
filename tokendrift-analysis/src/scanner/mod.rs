//! Scanner substrate: file discovery, caching, bounded parallelism,
//! per-file timeout and retry, progress reporting.
//!
//! The substrate is the entry point for every extraction pass. It discovers
//! files matching a source's include globs, runs an extractor over each file
//! under an independent timeout, isolates per-file failures into records,
//! and aggregates everything into a `ScanResult`.

pub mod cache;
pub mod cancellation;
pub mod concurrency;
pub mod discover;
pub mod excludes;
pub mod progress;
pub mod retry;
pub mod substrate;
pub mod timeout;

pub use cache::{MokaScanCache, ScanCache, hash_content};
pub use cancellation::ScanCancellation;
pub use concurrency::adaptive_concurrency;
pub use discover::{DiscoveredFiles, discover_files};
pub use substrate::FileScanner;
