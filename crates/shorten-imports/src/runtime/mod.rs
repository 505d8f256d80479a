//! Filesystem runtime abstraction.
//!
//! Config discovery and module resolution only ever ask three questions of
//! the filesystem: does a file exist, does a directory exist, and what does a
//! file contain. This module defines the `Runtime` trait that answers them so
//! the resolution engine can run against the real disk (`NativeRuntime`) or an
//! in-memory file set (`MemoryRuntime`, test builds only).
//!
//! All calls are synchronous. There is no retry: an I/O failure is reported
//! the same way as a missing file and callers treat both as "absent".

mod native;

#[cfg(any(test, feature = "test-utils"))]
mod test_utils;

pub use native::NativeRuntime;

#[cfg(any(test, feature = "test-utils"))]
pub use test_utils::MemoryRuntime;

use std::fmt;
use std::path::{Path, PathBuf};

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),
}

/// Platform runtime trait
///
/// Implementations must be shareable across threads: a host may format many
/// files in parallel against one `ImportShortener`.
pub trait Runtime: Send + Sync + fmt::Debug {
    /// Check if `path` exists and is a regular file
    fn is_file(&self, path: &Path) -> bool;

    /// Check if `path` exists and is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Read a UTF-8 file into a string
    fn read_to_string(&self, path: &Path) -> RuntimeResult<String>;

    /// Get the current working directory, used to absolutize relative file paths
    fn current_dir(&self) -> RuntimeResult<PathBuf>;
}
