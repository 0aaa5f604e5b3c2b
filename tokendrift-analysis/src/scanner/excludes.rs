//! Built-in exclude sets applied to every scan.
//!
//! Source configs can add their own exclude globs; these defaults are
//! always merged in so build output and test scaffolding never reach
//! the extractors.

/// Directory names skipped at any depth. Dependency trees, build output,
/// framework caches, and VCS metadata.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "out",
    "coverage",
    ".next",
    ".nuxt",
    ".svelte-kit",
    ".astro",
    ".cache",
    ".turbo",
    ".output",
    "vendor",
    "target",
    "storybook-static",
];

/// Path segments that mark test and fixture trees.
pub const DEFAULT_EXCLUDED_SEGMENTS: &[&str] = &[
    "__tests__",
    "__mocks__",
    "__fixtures__",
    "__snapshots__",
    "cypress",
    "e2e",
];

/// File-name globs for test, story, and generated files.
pub const DEFAULT_EXCLUDED_FILES: &[&str] = &[
    "*.test.*",
    "*.spec.*",
    "*.stories.*",
    "*.story.*",
    "*.cy.*",
    "*.d.ts",
    "*.min.js",
    "*.min.css",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclude_sets_are_nonempty_and_distinct() {
        assert!(DEFAULT_EXCLUDED_DIRS.contains(&"node_modules"));
        assert!(DEFAULT_EXCLUDED_SEGMENTS.contains(&"__tests__"));
        assert!(DEFAULT_EXCLUDED_FILES.iter().any(|p| p.contains("stories")));
        for dir in DEFAULT_EXCLUDED_DIRS {
            assert!(!DEFAULT_EXCLUDED_FILES.contains(dir));
        }
    }
}
