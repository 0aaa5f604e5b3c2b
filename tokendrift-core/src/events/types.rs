//! Event payload types for the scan lifecycle.

use std::path::PathBuf;

use crate::types::scan::ScanErrorCode;

/// Payload for `on_scan_started`.
#[derive(Debug, Clone)]
pub struct ScanStartedEvent {
    pub root: PathBuf,
    pub file_count: usize,
}

/// Payload for `on_scan_progress`. Emitted once per completed file.
#[derive(Debug, Clone)]
pub struct ScanProgressEvent {
    pub completed: usize,
    pub total: usize,
}

/// Payload for `on_file_failed`.
#[derive(Debug, Clone)]
pub struct FileFailedEvent {
    pub file: PathBuf,
    pub code: ScanErrorCode,
    pub message: String,
}

/// Payload for `on_scan_complete`.
#[derive(Debug, Clone)]
pub struct ScanCompleteEvent {
    pub files_scanned: usize,
    pub items_found: usize,
    pub failed: usize,
    pub duration_ms: u64,
}
