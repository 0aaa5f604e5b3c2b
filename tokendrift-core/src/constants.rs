//! Compiled defaults shared across the workspace.

/// Default bounded worker-pool size for file processing.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Hard upper bound on worker-pool size, regardless of file count.
/// Keeps open-file-descriptor pressure bounded on large scans.
pub const MAX_CONCURRENCY: usize = 50;

/// File counts above this produce an advisory `LargeFileCount` warning.
pub const DEFAULT_LARGE_FILE_COUNT: usize = 5_000;

/// Per-file parse budget in milliseconds.
pub const DEFAULT_FILE_TIMEOUT_MS: u64 = 10_000;

/// Retries for transient IO failures before the error is recorded.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Base backoff delay in milliseconds; attempt `n` waits `n * base`.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 50;

/// Default capacity of the moka-backed scan cache (entries).
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Pixels per `rem`/`em` when converting spacing values.
pub const REM_BASE_PX: f64 = 16.0;

/// Minimum confidence for a token suggestion to be reported.
pub const DEFAULT_MIN_SUGGESTION_CONFIDENCE: f64 = 0.75;

/// Maximum suggestions returned per hardcoded value.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;

/// Name-similarity threshold for fuzzy token matching.
pub const FUZZY_NAME_THRESHOLD: f64 = 0.8;

/// Name-similarity threshold for the naming-drift check.
pub const NAMING_DRIFT_THRESHOLD: f64 = 0.85;
