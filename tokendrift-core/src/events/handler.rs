//! ScanEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing scan lifecycle events.
///
/// All methods have no-op default implementations, so handlers only need
/// to override the events they care about. `Send + Sync` is required
/// because events fire from worker threads.
pub trait ScanEventHandler: Send + Sync {
    fn on_scan_started(&self, _event: &ScanStartedEvent) {}
    fn on_scan_progress(&self, _event: &ScanProgressEvent) {}
    fn on_file_failed(&self, _event: &FileFailedEvent) {}
    fn on_scan_complete(&self, _event: &ScanCompleteEvent) {}
}
