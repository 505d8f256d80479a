//! Shared test utilities for shorten-imports integration tests

#![allow(dead_code)]

use shorten_imports::ImportShortener;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// `compilerOptions.paths` config mapping `@app/*` to `src/*`.
pub const APP_CONFIG: &str = r#"{
  "compilerOptions": {
    "baseUrl": ".",
    "paths": {
      "@app/*": ["src/*"]
    }
  }
}"#;

/// Target module most tests import.
pub const FORMAT_MODULE: &str = "export const formatName = () => \"x\";\n";

/// Create a test project with the given files.
///
/// # Arguments
/// * `temp` - Temporary directory
/// * `files` - Array of (path, content) tuples
///
/// # Returns
/// The root path of the created project
pub fn create_test_project(temp: &TempDir, files: &[(&str, &str)]) -> PathBuf {
    let root = temp.path().to_path_buf();

    for (path, content) in files {
        let file_path = root.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|_| panic!("Failed to create parent directory for {}", path));
        }
        fs::write(&file_path, content).unwrap_or_else(|_| panic!("Failed to write file {}", path));
    }

    root
}

/// Run a fresh shortener over `input` as if it were the file at `file_path`.
///
/// The file is created (empty) first so the importer exists on disk.
pub fn shorten_file(input: &str, file_path: &Path) -> String {
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    if !file_path.exists() {
        fs::write(file_path, "").unwrap();
    }
    ImportShortener::new().shorten(input, Some(file_path))
}
