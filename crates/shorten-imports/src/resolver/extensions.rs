//! Extension resolution for module files.
//!
//! Tries the path as written, then each extension from
//! [`RESOLVE_EXTENSIONS`], then `index.<ext>` inside a directory.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::paths::RESOLVE_EXTENSIONS;
use crate::runtime::Runtime;

/// Try to resolve a path with various extensions.
///
/// Extensions are appended rather than substituted, so `./format.utils`
/// tries `format.utils.ts` and never `format.ts`.
pub fn try_extensions(base_path: &Path, runtime: &dyn Runtime) -> Option<PathBuf> {
    // First, try the path as-is (might already have extension)
    if runtime.is_file(base_path) {
        return Some(base_path.to_path_buf());
    }

    RESOLVE_EXTENSIONS
        .iter()
        .map(|ext| append_extension(base_path, ext))
        .find(|candidate| runtime.is_file(candidate))
}

/// Try to resolve a directory with index files.
pub fn try_index_files(dir_path: &Path, runtime: &dyn Runtime) -> Option<PathBuf> {
    if !runtime.is_dir(dir_path) {
        return None;
    }

    RESOLVE_EXTENSIONS
        .iter()
        .map(|ext| dir_path.join(format!("index{ext}")))
        .find(|candidate| runtime.is_file(candidate))
}

/// Resolve a local file path with extension and index file fallbacks.
pub fn resolve_with_extensions(candidate: &Path, runtime: &dyn Runtime) -> Option<PathBuf> {
    try_extensions(candidate, runtime).or_else(|| try_index_files(candidate, runtime))
}

fn append_extension(base: &Path, ext: &str) -> PathBuf {
    let mut path = OsString::from(base.as_os_str());
    path.push(ext);
    PathBuf::from(path)
}
