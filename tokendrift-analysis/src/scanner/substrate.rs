//! The scan driver: discovery, bounded parallel extraction, reduction.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use tokendrift_core::config::ScanConfig;
use tokendrift_core::errors::{ConfigError, ExtractError};
use tokendrift_core::events::{
    EventDispatcher, FileFailedEvent, ScanCompleteEvent, ScanStartedEvent,
};
use tokendrift_core::types::scan::{ScanError, ScanResult, ScanStats};

use crate::extractors::{FileExtractor, FileOutput};
use crate::signals::SignalAggregator;

use super::cache::{ScanCache, hash_content};
use super::cancellation::ScanCancellation;
use super::concurrency::adaptive_concurrency;
use super::discover::discover_files;
use super::progress::ProgressTracker;
use super::retry::read_with_retry;
use super::timeout::run_with_timeout;

enum FileOutcome<T> {
    Produced { output: FileOutput<T>, cache_hit: bool },
    Failed(ScanError),
    Skipped,
}

/// Runs one extractor over every file matching a set of include globs.
///
/// Failures are scoped to the file that caused them: a parse error, a
/// timeout, or an I/O failure produces a `ScanError` record while the
/// rest of the batch continues. Only configuration problems abort the
/// scan.
pub struct FileScanner<E: FileExtractor> {
    extractor: Arc<E>,
    config: ScanConfig,
    cache: Option<Arc<dyn ScanCache<E::Item>>>,
    events: EventDispatcher,
    cancel: ScanCancellation,
}

impl<E: FileExtractor + 'static> FileScanner<E> {
    pub fn new(extractor: E, config: ScanConfig) -> Self {
        Self {
            extractor: Arc::new(extractor),
            config,
            cache: None,
            events: EventDispatcher::new(),
            cancel: ScanCancellation::new(),
        }
    }

    /// Attach a cache. Hits skip parsing and reuse prior output.
    pub fn with_cache(mut self, cache: Arc<dyn ScanCache<E::Item>>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn with_cancellation(mut self, cancel: ScanCancellation) -> Self {
        self.cancel = cancel;
        self
    }

    /// Handle callers can use to stop the scan between files.
    pub fn cancellation(&self) -> ScanCancellation {
        self.cancel.clone()
    }

    /// Scan, discarding raw signals. See [`FileScanner::scan_collecting`].
    pub fn scan(
        &self,
        root: &Path,
        include: &[String],
        exclude: &[String],
    ) -> Result<ScanResult<E::Item>, ConfigError> {
        let mut signals = SignalAggregator::new();
        self.scan_collecting(root, include, exclude, &mut signals)
    }

    /// Scan and merge per-file raw signals into `signals`.
    ///
    /// Items arrive in discovery order (sorted by path), so repeated
    /// scans of an unchanged tree produce identical results.
    pub fn scan_collecting(
        &self,
        root: &Path,
        include: &[String],
        exclude: &[String],
        signals: &mut SignalAggregator,
    ) -> Result<ScanResult<E::Item>, ConfigError> {
        let started = Instant::now();
        let discovered = discover_files(root, include, exclude, &self.config, &self.cancel)?;
        let total = discovered.files.len();

        self.events.emit_scan_started(&ScanStartedEvent {
            root: root.to_path_buf(),
            file_count: total,
        });

        let mut result: ScanResult<E::Item> = ScanResult::default();
        result.warnings = discovered.warnings;

        if total == 0 {
            result.stats.duration_ms = elapsed_ms(started);
            self.emit_complete(&result);
            return Ok(result);
        }

        let workers = adaptive_concurrency(total, self.config.concurrency);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("tokendrift-scan-{i}"))
            .build()
            .map_err(|e| ConfigError::ValidationFailed {
                field: "scan.concurrency".to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(
            extractor = self.extractor.name(),
            files = total,
            workers,
            "starting extraction"
        );

        let progress = ProgressTracker::new(total, &self.events);
        let outcomes: Vec<FileOutcome<E::Item>> = pool.install(|| {
            discovered
                .files
                .par_iter()
                .map(|path| {
                    let outcome = self.process_file(path);
                    if !matches!(outcome, FileOutcome::Skipped) {
                        progress.file_done();
                    }
                    outcome
                })
                .collect()
        });

        // Single-threaded reduction; nothing below takes a lock.
        let mut scanned = 0usize;
        let mut cache_hits = 0usize;
        for outcome in outcomes {
            match outcome {
                FileOutcome::Produced { output, cache_hit } => {
                    scanned += 1;
                    if cache_hit {
                        cache_hits += 1;
                    }
                    result.items.extend(output.items);
                    signals.merge(output.signals);
                }
                FileOutcome::Failed(err) => {
                    scanned += 1;
                    result.errors.push(err);
                }
                FileOutcome::Skipped => {}
            }
        }

        result.stats = ScanStats {
            files_scanned: scanned,
            items_found: result.items.len(),
            duration_ms: elapsed_ms(started),
        };

        let secs = (result.stats.duration_ms as f64 / 1000.0).max(0.001);
        tracing::info!(
            extractor = self.extractor.name(),
            files_scanned = scanned,
            items_found = result.stats.items_found,
            failed = result.errors.len(),
            scan_files_per_second = (scanned as f64 / secs) as u64,
            cache_hit_rate = if scanned > 0 { cache_hits as f64 / scanned as f64 } else { 0.0 },
            duration_ms = result.stats.duration_ms,
            "scan complete"
        );
        self.emit_complete(&result);
        Ok(result)
    }

    fn process_file(&self, path: &Path) -> FileOutcome<E::Item> {
        if self.cancel.is_cancelled() {
            return FileOutcome::Skipped;
        }

        let source = match read_with_retry(path, &self.config) {
            Ok(s) => s,
            Err(e) => return self.fail(path, &e),
        };
        let content_hash = hash_content(source.as_bytes());

        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(path, content_hash) {
                tracing::debug!(path = %path.display(), "cache hit");
                return FileOutcome::Produced {
                    output: (*hit).clone(),
                    cache_hit: true,
                };
            }
        }

        let extractor = Arc::clone(&self.extractor);
        let job_path = path.to_path_buf();
        let outcome = run_with_timeout(self.config.effective_file_timeout_ms(), move || {
            extractor.extract(&job_path, &source)
        });

        match outcome {
            Ok(output) => {
                if let Some(cache) = &self.cache {
                    cache.put(path, content_hash, Arc::new(output.clone()));
                }
                FileOutcome::Produced {
                    output,
                    cache_hit: false,
                }
            }
            Err(e) => self.fail(path, &e),
        }
    }

    fn fail(&self, path: &Path, err: &ExtractError) -> FileOutcome<E::Item> {
        tracing::warn!(path = %path.display(), error = %err, "file scan error");
        let scan_error = err.to_scan_error(path);
        self.events.emit_file_failed(&FileFailedEvent {
            file: path.to_path_buf(),
            code: scan_error.code,
            message: scan_error.message.clone(),
        });
        FileOutcome::Failed(scan_error)
    }

    fn emit_complete(&self, result: &ScanResult<E::Item>) {
        self.events.emit_scan_complete(&ScanCompleteEvent {
            files_scanned: result.stats.files_scanned,
            items_found: result.stats.items_found,
            failed: result.errors.len(),
            duration_ms: result.stats.duration_ms,
        });
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
