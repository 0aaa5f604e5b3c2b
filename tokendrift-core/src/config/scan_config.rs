//! Scanner behavior configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the scan substrate.
#[derive(Debug, Clone, Serialize, Deserialize, Default, schemars::JsonSchema)]
#[serde(default)]
pub struct ScanConfig {
    /// Worker pool size. Unset = adaptive by file count. Capped at 50.
    pub concurrency: Option<usize>,
    /// Per-file parse timeout in milliseconds. Default: 10_000.
    pub file_timeout_ms: Option<u64>,
    /// Retry attempts for transient I/O failures. Default: 2.
    pub max_retries: Option<u32>,
    /// Base retry delay in milliseconds; grows linearly per attempt. Default: 50.
    pub retry_delay_ms: Option<u64>,
    /// Parse cache capacity in entries. Default: 10_000.
    pub cache_capacity: Option<u64>,
    /// File count above which a LARGE_FILE_COUNT advisory fires. Default: 5_000.
    pub large_file_count: Option<usize>,
    /// Follow symbolic links during discovery. Default: false.
    pub follow_symlinks: Option<bool>,
}

impl ScanConfig {
    /// Returns the effective per-file timeout, defaulting to 10_000 ms.
    pub fn effective_file_timeout_ms(&self) -> u64 {
        self.file_timeout_ms.unwrap_or(constants::DEFAULT_FILE_TIMEOUT_MS)
    }

    /// Returns the effective retry bound, defaulting to 2.
    pub fn effective_max_retries(&self) -> u32 {
        self.max_retries.unwrap_or(constants::DEFAULT_MAX_RETRIES)
    }

    /// Returns the effective base retry delay, defaulting to 50 ms.
    pub fn effective_retry_delay_ms(&self) -> u64 {
        self.retry_delay_ms.unwrap_or(constants::DEFAULT_RETRY_DELAY_MS)
    }

    /// Returns the effective cache capacity, defaulting to 10_000 entries.
    pub fn effective_cache_capacity(&self) -> u64 {
        self.cache_capacity.unwrap_or(constants::DEFAULT_CACHE_CAPACITY)
    }

    /// Returns the effective large-file-count advisory threshold,
    /// defaulting to 5_000.
    pub fn effective_large_file_count(&self) -> usize {
        self.large_file_count.unwrap_or(constants::DEFAULT_LARGE_FILE_COUNT)
    }

    /// Returns whether discovery follows symlinks, defaulting to false.
    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }
}
