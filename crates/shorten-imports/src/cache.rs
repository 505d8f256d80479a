//! Run-scoped memoization for config discovery and module resolution.
//!
//! The filesystem is assumed stable for the duration of one run, so entries
//! are never invalidated individually. Lookups are get-then-insert without a
//! per-key guard: two threads racing on the same key both compute the same
//! deterministic value and one insert wins.

use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;

use crate::config::AliasContext;

/// Composite key for a cached resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolutionKey {
    /// File containing the import
    pub importer: PathBuf,
    /// Specifier text as written (slash-normalized)
    pub specifier: String,
    /// Config file governing the importer
    pub config_path: PathBuf,
}

impl ResolutionKey {
    pub fn new(importer: &Path, specifier: &str, config_path: &Path) -> Self {
        Self {
            importer: importer.to_path_buf(),
            specifier: specifier.to_string(),
            config_path: config_path.to_path_buf(),
        }
    }
}

/// The three memo tables shared by every file processed in one run.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    config_paths: DashMap<PathBuf, Option<PathBuf>, FxBuildHasher>,
    contexts: DashMap<PathBuf, Option<Arc<AliasContext>>, FxBuildHasher>,
    resolutions: DashMap<ResolutionKey, Option<PathBuf>, FxBuildHasher>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory → nearest config file location.
    pub fn config_path(
        &self,
        dir: &Path,
        compute: impl FnOnce() -> Option<PathBuf>,
    ) -> Option<PathBuf> {
        memoize(&self.config_paths, dir.to_path_buf(), compute)
    }

    /// Config file location → parsed alias context.
    pub fn context(
        &self,
        config_path: &Path,
        compute: impl FnOnce() -> Option<Arc<AliasContext>>,
    ) -> Option<Arc<AliasContext>> {
        memoize(&self.contexts, config_path.to_path_buf(), compute)
    }

    /// Resolution key → resolved file.
    pub fn resolution(
        &self,
        key: ResolutionKey,
        compute: impl FnOnce() -> Option<PathBuf>,
    ) -> Option<PathBuf> {
        memoize(&self.resolutions, key, compute)
    }

    /// Number of cached resolutions (hits and misses).
    pub fn resolution_count(&self) -> usize {
        self.resolutions.len()
    }

    /// Drop every entry, ending the current run.
    pub fn clear(&self) {
        self.config_paths.clear();
        self.contexts.clear();
        self.resolutions.clear();
    }
}

fn memoize<K, V>(map: &DashMap<K, V, FxBuildHasher>, key: K, compute: impl FnOnce() -> V) -> V
where
    K: Eq + Hash,
    V: Clone,
{
    if let Some(hit) = map.get(&key) {
        return hit.value().clone();
    }
    // The shard lock is released before computing so `compute` may re-enter the cache.
    let value = compute();
    map.insert(key, value.clone());
    value
}
