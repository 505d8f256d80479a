//! In-memory runtime for tests.
//!
//! Directories are implied by the files registered under them, which is all
//! module resolution needs.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use super::{Runtime, RuntimeError, RuntimeResult};

/// Runtime backed by a fixed set of in-memory files.
#[derive(Debug, Default, Clone)]
pub struct MemoryRuntime {
    files: FxHashMap<PathBuf, String>,
    cwd: PathBuf,
}

impl MemoryRuntime {
    /// Create an empty runtime whose working directory is `/`.
    pub fn new() -> Self {
        Self {
            files: FxHashMap::default(),
            cwd: PathBuf::from("/"),
        }
    }

    /// Register a file with the given contents.
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    /// Override the working directory.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }
}

impl Runtime for MemoryRuntime {
    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files
            .keys()
            .any(|file| file != path && file.starts_with(path))
    }

    fn read_to_string(&self, path: &Path) -> RuntimeResult<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| RuntimeError::FileNotFound(path.to_path_buf()))
    }

    fn current_dir(&self) -> RuntimeResult<PathBuf> {
        Ok(self.cwd.clone())
    }
}
