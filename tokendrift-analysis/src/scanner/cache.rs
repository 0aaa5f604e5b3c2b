//! Extraction cache keyed by path and content hash.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use xxhash_rust::xxh3::xxh3_64;

use crate::extractors::FileOutput;

/// xxh3 64-bit hash of file content. Used for cache keys and change
/// detection.
#[inline]
pub fn hash_content(content: &[u8]) -> u64 {
    xxh3_64(content)
}

/// Injectable cache for per-file extraction output.
///
/// Keys combine the path with the content hash, so an edited file misses
/// and a reverted file hits again. A scan without a cache simply parses
/// every file.
pub trait ScanCache<T>: Send + Sync {
    fn get(&self, path: &Path, content_hash: u64) -> Option<Arc<FileOutput<T>>>;
    fn put(&self, path: &Path, content_hash: u64, output: Arc<FileOutput<T>>);
}

/// Default cache backed by `moka::sync::Cache`.
pub struct MokaScanCache<T> {
    inner: moka::sync::Cache<(PathBuf, u64), Arc<FileOutput<T>>>,
}

impl<T: Send + Sync + 'static> MokaScanCache<T> {
    /// Create a cache bounded to `capacity` entries.
    pub fn new(capacity: u64) -> Self {
        Self {
            inner: moka::sync::Cache::new(capacity),
        }
    }

    /// Number of cached entries (approximate under concurrency).
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl<T: Send + Sync + 'static> ScanCache<T> for MokaScanCache<T> {
    fn get(&self, path: &Path, content_hash: u64) -> Option<Arc<FileOutput<T>>> {
        self.inner.get(&(path.to_path_buf(), content_hash))
    }

    fn put(&self, path: &Path, content_hash: u64, output: Arc<FileOutput<T>>) {
        self.inner.insert((path.to_path_buf(), content_hash), output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_hash() {
        let data = b"--color-primary: #3366ff;";
        assert_eq!(hash_content(data), hash_content(data));
        assert_ne!(hash_content(b"a"), hash_content(b"b"));
    }

    #[test]
    fn hit_requires_matching_path_and_hash() {
        let cache: MokaScanCache<String> = MokaScanCache::new(16);
        let path = Path::new("src/Button.tsx");
        let output = Arc::new(FileOutput::new(vec!["Button".to_string()], Vec::new()));

        cache.put(path, 42, output);
        // moka::sync::Cache::insert is visible to get immediately on the
        // same thread.
        assert!(cache.get(path, 42).is_some());
        assert!(cache.get(path, 43).is_none());
        assert!(cache.get(Path::new("src/Other.tsx"), 42).is_none());
    }
}
