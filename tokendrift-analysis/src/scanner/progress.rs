//! Serialized progress reporting.

use std::sync::Mutex;

use tokendrift_core::events::{EventDispatcher, ScanProgressEvent};

/// Tracks completed files and emits one progress event per completion.
///
/// The counter and the emit happen under one lock, so observers see a
/// strictly increasing `completed` and never two events out of order,
/// regardless of worker interleaving.
pub struct ProgressTracker<'a> {
    total: usize,
    completed: Mutex<usize>,
    events: &'a EventDispatcher,
}

impl<'a> ProgressTracker<'a> {
    pub fn new(total: usize, events: &'a EventDispatcher) -> Self {
        Self {
            total,
            completed: Mutex::new(0),
            events,
        }
    }

    /// Record one finished file and notify handlers. Returns the new
    /// completed count.
    pub fn file_done(&self) -> usize {
        let mut guard = self
            .completed
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard += 1;
        let completed = *guard;
        self.events.emit_scan_progress(&ScanProgressEvent {
            completed,
            total: self.total,
        });
        completed
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokendrift_core::events::ScanEventHandler;

    use super::*;

    struct Monotonic {
        last: AtomicUsize,
        violations: AtomicUsize,
    }

    impl ScanEventHandler for Monotonic {
        fn on_scan_progress(&self, event: &ScanProgressEvent) {
            let prev = self.last.swap(event.completed, Ordering::SeqCst);
            if event.completed != prev + 1 {
                self.violations.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn parallel_completions_stay_monotonic() {
        let observer = Arc::new(Monotonic {
            last: AtomicUsize::new(0),
            violations: AtomicUsize::new(0),
        });
        let mut events = EventDispatcher::new();
        events.register(observer.clone());

        let tracker = ProgressTracker::new(64, &events);
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..8 {
                        tracker.file_done();
                    }
                });
            }
        });

        assert_eq!(observer.last.load(Ordering::SeqCst), 64);
        assert_eq!(observer.violations.load(Ordering::SeqCst), 0);
    }
}
