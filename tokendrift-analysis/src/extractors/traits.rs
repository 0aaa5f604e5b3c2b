//! Extractor strategy trait composed into the scan substrate.

use std::path::Path;

use tokendrift_core::errors::ExtractError;
use tokendrift_core::types::signal::RawSignal;

/// Output of running an extractor over one file: the entities it
/// produced plus the raw style signals observed along the way.
#[derive(Debug, Clone)]
pub struct FileOutput<T> {
    pub items: Vec<T>,
    pub signals: Vec<RawSignal>,
}

impl<T> FileOutput<T> {
    pub fn new(items: Vec<T>, signals: Vec<RawSignal>) -> Self {
        Self { items, signals }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.signals.is_empty()
    }
}

impl<T> Default for FileOutput<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            signals: Vec::new(),
        }
    }
}

/// A per-dialect extraction strategy.
///
/// Implementations parse one file's source text and return the entities
/// found there. They must be shareable across scan workers and must
/// report failures through `ExtractError` rather than panicking; the
/// substrate treats a panic as a parse failure of that file only.
pub trait FileExtractor: Send + Sync {
    /// The entity this extractor produces.
    type Item: Clone + Send + Sync + 'static;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Extract entities from one file.
    fn extract(&self, path: &Path, source: &str) -> Result<FileOutput<Self::Item>, ExtractError>;
}
