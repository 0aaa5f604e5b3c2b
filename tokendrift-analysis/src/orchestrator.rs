//! Project-level orchestration: one scan per enabled source, merged
//! into a single result with cross-referenced components and tokens.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tokendrift_core::config::{ScanConfig, SourceConfig};
use tokendrift_core::errors::ConfigError;
use tokendrift_core::events::EventDispatcher;
use tokendrift_core::types::collections::{FxHashMap, FxHashSet};
use tokendrift_core::types::component::{Component, Dialect};
use tokendrift_core::types::scan::{ScanError, ScanResult, ScanStats, ScanWarning};
use tokendrift_core::types::signal::{RawSignal, SignalKind};
use tokendrift_core::types::token::DesignToken;

use crate::extractors::{
    FastExtractor, FileExtractor, LitExtractor, ReactExtractor, StencilExtractor, SvelteExtractor,
    TemplateExtractor, TokenFileExtractor, TokenUsageIndex,
};
use crate::scanner::{FileScanner, ScanCancellation};
use crate::signals::SignalAggregator;

/// Merged output of one project scan across every configured source.
#[derive(Debug, Clone, Default)]
pub struct ProjectScan {
    pub components: Vec<Component>,
    pub tokens: Vec<DesignToken>,
    pub signals: Vec<RawSignal>,
    /// Distinct UI frameworks observed, sorted by name.
    pub frameworks: Vec<String>,
    pub errors: Vec<ScanError>,
    pub warnings: Vec<ScanWarning>,
    pub stats: ScanStats,
}

/// Fans one scan per enabled source out through the substrate and
/// merges the results.
pub struct ProjectScanner {
    config: ScanConfig,
    events: EventDispatcher,
    cancel: ScanCancellation,
}

impl ProjectScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config, events: EventDispatcher::new(), cancel: ScanCancellation::new() }
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn with_cancellation(mut self, cancel: ScanCancellation) -> Self {
        self.cancel = cancel;
        self
    }

    /// Handle callers can use to stop the scan between sources.
    pub fn cancellation(&self) -> ScanCancellation {
        self.cancel.clone()
    }

    /// Scan `root` once per enabled source.
    ///
    /// Per-file failures stay in `errors` and never abort the project
    /// scan; only configuration problems (bad globs, broken pool
    /// settings) propagate. Components appearing through more than one
    /// source keep their first occurrence.
    pub fn scan(&self, root: &Path, sources: &[SourceConfig]) -> Result<ProjectScan, ConfigError> {
        let started = Instant::now();
        let mut aggregator = SignalAggregator::new();
        let mut scan = ProjectScan::default();

        for source in sources.iter().filter(|s| s.effective_enabled()) {
            if self.cancel.is_cancelled() {
                break;
            }
            match source.kind {
                Dialect::React => {
                    let mut extractor = ReactExtractor::new();
                    if let Some(pkg) = &source.design_system_package {
                        extractor = extractor.with_design_system(pkg.as_str());
                    }
                    self.scan_components(extractor, root, source, &mut aggregator, &mut scan)?;
                }
                Dialect::Svelte => {
                    let mut extractor = SvelteExtractor::new();
                    if let Some(pkg) = &source.design_system_package {
                        extractor = extractor.with_design_system(pkg.as_str());
                    }
                    self.scan_components(extractor, root, source, &mut aggregator, &mut scan)?;
                }
                Dialect::Stencil => {
                    let mut extractor = StencilExtractor::new();
                    if let Some(pkg) = &source.design_system_package {
                        extractor = extractor.with_design_system(pkg.as_str());
                    }
                    self.scan_components(extractor, root, source, &mut aggregator, &mut scan)?;
                }
                Dialect::Lit => {
                    let mut extractor = LitExtractor::new();
                    if let Some(pkg) = &source.design_system_package {
                        extractor = extractor.with_design_system(pkg.as_str());
                    }
                    if let Some(bases) = flag_list(source, "base-classes") {
                        extractor = extractor.with_base_classes(bases);
                    }
                    self.scan_components(extractor, root, source, &mut aggregator, &mut scan)?;
                }
                Dialect::Fast => {
                    let mut extractor = FastExtractor::new();
                    if let Some(pkg) = &source.design_system_package {
                        extractor = extractor.with_design_system(pkg.as_str());
                    }
                    if let Some(bases) = flag_list(source, "base-classes") {
                        extractor = extractor.with_base_classes(bases);
                    }
                    self.scan_components(extractor, root, source, &mut aggregator, &mut scan)?;
                }
                Dialect::Template => {
                    let mut extractor = TemplateExtractor::new();
                    if let Some(engines) = flag_list(source, "engines") {
                        extractor = extractor.with_engines(engines);
                    }
                    self.scan_components(extractor, root, source, &mut aggregator, &mut scan)?;
                }
                Dialect::TokenFile => {
                    let scanner = self.scanner(TokenFileExtractor::new());
                    let result = scanner.scan_collecting(
                        root,
                        &source.effective_include(),
                        &source.exclude,
                        &mut aggregator,
                    )?;
                    let ScanResult { items, errors, warnings, stats } = result;
                    scan.tokens.extend(items);
                    scan.errors.extend(errors);
                    scan.warnings.extend(warnings);
                    scan.stats.files_scanned += stats.files_scanned;
                }
            }
        }

        scan.signals = aggregator.into_signals();
        dedupe_components(&mut scan.components);
        scan.frameworks = detected_frameworks(&scan.components);
        link_token_usage(&mut scan);

        scan.stats.items_found = scan.components.len() + scan.tokens.len();
        scan.stats.duration_ms =
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::info!(
            components = scan.components.len(),
            tokens = scan.tokens.len(),
            signals = scan.signals.len(),
            frameworks = ?scan.frameworks,
            failed = scan.errors.len(),
            duration_ms = scan.stats.duration_ms,
            "project scan complete"
        );
        Ok(scan)
    }

    fn scanner<E: FileExtractor + 'static>(&self, extractor: E) -> FileScanner<E> {
        FileScanner::new(extractor, self.config.clone())
            .with_events(self.events.clone())
            .with_cancellation(self.cancel.clone())
    }

    fn scan_components<E>(
        &self,
        extractor: E,
        root: &Path,
        source: &SourceConfig,
        aggregator: &mut SignalAggregator,
        scan: &mut ProjectScan,
    ) -> Result<(), ConfigError>
    where
        E: FileExtractor<Item = Component> + 'static,
    {
        let scanner = self.scanner(extractor);
        let result = scanner.scan_collecting(
            root,
            &source.effective_include(),
            &source.exclude,
            aggregator,
        )?;
        let ScanResult { items, errors, warnings, stats } = result;
        scan.components.extend(items);
        scan.errors.extend(errors);
        scan.warnings.extend(warnings);
        scan.stats.files_scanned += stats.files_scanned;
        Ok(())
    }
}

/// Comma-separated dialect flag, trimmed, empty entries dropped.
fn flag_list(source: &SourceConfig, key: &str) -> Option<Vec<String>> {
    let raw = source.flags.get(key)?;
    let list: Vec<String> =
        raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect();
    (!list.is_empty()).then_some(list)
}

/// Components found through more than one source keep their first
/// occurrence. Ids derive from path + name, so a `.tsx` file matched by
/// both a React and a Stencil source collapses to one entry.
fn dedupe_components(components: &mut Vec<Component>) {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    components.retain(|c| seen.insert(c.id.clone()));
}

fn detected_frameworks(components: &[Component]) -> Vec<String> {
    let mut names: Vec<String> = components
        .iter()
        .filter(|c| c.source.dialect.is_ui_framework())
        .map(|c| c.source.dialect.as_str().to_string())
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Resolve token-usage signals into two-way references: components list
/// the token ids they touch, tokens list the component ids touching
/// them. Usages in files without components (plain stylesheets, token
/// files referencing each other) have no component side to link.
fn link_token_usage(scan: &mut ProjectScan) {
    if scan.tokens.is_empty() {
        return;
    }
    let index = TokenUsageIndex::build(&scan.tokens);
    if index.is_empty() {
        return;
    }
    let token_slot: FxHashMap<String, usize> =
        scan.tokens.iter().enumerate().map(|(i, t)| (t.id.clone(), i)).collect();
    let mut file_components: FxHashMap<PathBuf, Vec<usize>> = FxHashMap::default();
    for (i, component) in scan.components.iter().enumerate() {
        file_components.entry(component.source.path.clone()).or_default().push(i);
    }

    for signal in scan.signals.iter().filter(|s| s.kind == SignalKind::TokenUsage) {
        let Some(component_indexes) = file_components.get(&signal.file) else { continue };
        for token_id in index.token_ids_in(&signal.value) {
            let Some(&slot) = token_slot.get(&token_id) else { continue };
            for &ci in component_indexes {
                let component_id = scan.components[ci].id.clone();
                let token = &mut scan.tokens[slot];
                if !token.used_by.contains(&component_id) {
                    token.used_by.push(component_id);
                }
                let component = &mut scan.components[ci];
                if !component.tokens.contains(&token_id) {
                    component.tokens.push(token_id.clone());
                }
            }
        }
    }
}
