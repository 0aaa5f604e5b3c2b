//! Scan envelopes: every scan returns its items plus the errors and
//! warnings accumulated along the way. Failures never abort a scan.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Machine-readable code for a per-file scan failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanErrorCode {
    ParseError,
    Timeout,
    IoError,
}

impl ScanErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanErrorCode::ParseError => "PARSE_ERROR",
            ScanErrorCode::Timeout => "TIMEOUT",
            ScanErrorCode::IoError => "IO_ERROR",
        }
    }
}

/// One file that failed to scan. Recorded, never thrown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanError {
    pub file: PathBuf,
    pub message: String,
    pub code: ScanErrorCode,
}

impl ScanError {
    pub fn new(file: impl Into<PathBuf>, code: ScanErrorCode, message: impl Into<String>) -> Self {
        Self { file: file.into(), message: message.into(), code }
    }
}

/// Machine-readable code for a scan-level advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    NoFilesMatched,
    LargeFileCount,
}

impl WarningCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningCode::NoFilesMatched => "NO_FILES_MATCHED",
            WarningCode::LargeFileCount => "LARGE_FILE_COUNT",
        }
    }
}

/// A non-fatal advisory about scan configuration or scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWarning {
    pub code: WarningCode,
    pub message: String,
    /// The include pattern involved, for `NO_FILES_MATCHED`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl ScanWarning {
    pub fn no_files_matched(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        Self {
            code: WarningCode::NoFilesMatched,
            message: format!("include pattern '{pattern}' matched no files"),
            pattern: Some(pattern),
        }
    }

    pub fn large_file_count(count: usize, threshold: usize) -> Self {
        Self {
            code: WarningCode::LargeFileCount,
            message: format!(
                "scan will cover {count} files (advisory threshold {threshold}); \
                 consider narrowing include patterns"
            ),
            pattern: None,
        }
    }
}

/// Aggregate counters for one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub items_found: usize,
    pub duration_ms: u64,
}

/// Envelope returned by every scan operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult<T> {
    pub items: Vec<T>,
    pub errors: Vec<ScanError>,
    pub warnings: Vec<ScanWarning>,
    pub stats: ScanStats,
}

impl<T> Default for ScanResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: ScanStats::default(),
        }
    }
}

impl<T> ScanResult<T> {
    /// True when every discovered file scanned cleanly.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Map items into another shape, keeping errors, warnings, and stats.
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> ScanResult<U> {
        ScanResult {
            items: self.items.into_iter().map(f).collect(),
            errors: self.errors,
            warnings: self.warnings,
            stats: self.stats,
        }
    }
}
