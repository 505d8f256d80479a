//! Source file discovery.
//!
//! Explicit file arguments are taken as given. Directories are walked with
//! the `ignore` crate, so `.gitignore` rules apply, and `node_modules` is
//! never entered. Only files the shortener can read are returned.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use shorten_imports::paths::VENDOR_DIR;
use shorten_imports::FileKind;

use crate::error::{CliError, Result};

/// Collect every recognized source file under `paths`, sorted and deduplicated.
pub fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_source_file(path) {
                files.push(path.clone());
            } else {
                tracing::debug!("Skipping unsupported file: {}", path.display());
            }
        } else if path.is_dir() {
            walk_dir(path, &mut files)?;
        } else {
            return Err(CliError::FileNotFound(path.clone()));
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let walker = WalkBuilder::new(dir)
        .filter_entry(|entry| entry.file_name() != VENDOR_DIR)
        .build();

    for entry in walker {
        let entry = entry?;
        let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
        if is_file && is_source_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(())
}

fn is_source_file(path: &Path) -> bool {
    FileKind::from_path(path).is_some()
}
