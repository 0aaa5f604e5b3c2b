//! File discovery via the `ignore` crate's parallel walker.
//!
//! Include globs act as a whitelist, exclude globs and the built-in
//! exclude sets as a blacklist. Respects `.gitignore` and
//! `.tokendriftignore`. Results are sorted by path so repeated scans of
//! an unchanged tree discover files in the same order.

use std::path::{Path, PathBuf};

use crossbeam_channel as channel;
use tokendrift_core::config::ScanConfig;
use tokendrift_core::errors::ConfigError;
use tokendrift_core::types::scan::ScanWarning;

use super::cancellation::ScanCancellation;
use super::excludes::{DEFAULT_EXCLUDED_DIRS, DEFAULT_EXCLUDED_FILES, DEFAULT_EXCLUDED_SEGMENTS};

/// Discovery output: the matched files plus any advisory warnings.
#[derive(Debug, Default)]
pub struct DiscoveredFiles {
    pub files: Vec<PathBuf>,
    pub warnings: Vec<ScanWarning>,
}

/// Walk `root` and return every file matching at least one include glob
/// and no exclude.
///
/// Fails only on configuration problems: a missing or unreadable root, or
/// a syntactically invalid glob. A pattern that matches nothing is a
/// warning, not an error; an empty result set is a successful scan of
/// zero files.
pub fn discover_files(
    root: &Path,
    include: &[String],
    exclude: &[String],
    scan: &ScanConfig,
    cancel: &ScanCancellation,
) -> Result<DiscoveredFiles, ConfigError> {
    if !root.is_dir() {
        return Err(ConfigError::FileNotFound {
            path: root.display().to_string(),
        });
    }

    // Reject malformed globs up front so the caller gets a hard error
    // instead of a silently empty scan.
    for pattern in include.iter().chain(exclude.iter()) {
        validate_glob(pattern)?;
    }

    let (tx, rx) = channel::unbounded();

    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .add_custom_ignore_filename(".tokendriftignore")
        .follow_links(scan.effective_follow_symlinks());

    // Overrides use gitignore syntax evaluated in order: positive patterns
    // whitelist, negated patterns blacklist. Includes go in first, then
    // the built-in and user excludes so an exclude always wins.
    let mut overrides = ignore::overrides::OverrideBuilder::new(root);
    for pattern in include {
        overrides
            .add(pattern)
            .map_err(|e| invalid_pattern(pattern, &e))?;
    }
    for dir in DEFAULT_EXCLUDED_DIRS.iter().chain(DEFAULT_EXCLUDED_SEGMENTS) {
        let _ = overrides.add(&format!("!{dir}/**"));
        let _ = overrides.add(&format!("!{dir}"));
    }
    for file_glob in DEFAULT_EXCLUDED_FILES {
        let _ = overrides.add(&format!("!{file_glob}"));
    }
    for pattern in exclude {
        overrides
            .add(&format!("!{pattern}"))
            .map_err(|e| invalid_pattern(pattern, &e))?;
    }
    let built = overrides
        .build()
        .map_err(|e| invalid_pattern("<overrides>", &e))?;
    builder.overrides(built);

    let walker = builder.build_parallel();
    walker.run(|| {
        let tx = tx.clone();
        let cancel = cancel.clone();
        Box::new(move |entry| {
            if cancel.is_cancelled() {
                return ignore::WalkState::Quit;
            }
            let entry = match entry {
                Ok(e) => e,
                Err(_) => return ignore::WalkState::Continue,
            };
            match entry.file_type() {
                Some(ft) if ft.is_file() => {}
                _ => return ignore::WalkState::Continue,
            }
            let _ = tx.send(entry.path().to_path_buf());
            ignore::WalkState::Continue
        })
    });
    drop(tx);

    let mut files: Vec<PathBuf> = rx.into_iter().collect();
    files.sort();
    files.dedup();

    let mut warnings = Vec::new();
    for pattern in include {
        let hit = files
            .iter()
            .any(|f| pattern_matches(pattern, root, f));
        if !hit {
            warnings.push(ScanWarning::no_files_matched(pattern));
        }
    }

    let threshold = scan.effective_large_file_count();
    if files.len() > threshold {
        warnings.push(ScanWarning::large_file_count(files.len(), threshold));
    }

    tracing::debug!(
        root = %root.display(),
        files = files.len(),
        warnings = warnings.len(),
        "discovery complete"
    );

    Ok(DiscoveredFiles { files, warnings })
}

fn validate_glob(pattern: &str) -> Result<(), ConfigError> {
    glob::Pattern::new(pattern).map(|_| ()).map_err(|e| {
        ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        }
    })
}

fn invalid_pattern(pattern: &str, err: &ignore::Error) -> ConfigError {
    ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        message: err.to_string(),
    }
}

/// Attribute a discovered file to an include pattern for zero-match
/// warnings. Mirrors gitignore semantics: a pattern containing `/` is
/// matched against the root-relative path, otherwise against the file
/// name alone.
fn pattern_matches(pattern: &str, root: &Path, file: &Path) -> bool {
    let Ok(compiled) = glob::Pattern::new(pattern) else {
        return false;
    };
    if pattern.contains('/') {
        let rel = file.strip_prefix(root).unwrap_or(file);
        compiled.matches_path(rel)
    } else {
        file.file_name()
            .map(|name| compiled.matches(&name.to_string_lossy()))
            .unwrap_or(false)
    }
}
