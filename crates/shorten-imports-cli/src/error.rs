//! Error handling for the CLI.
//!
//! The core never fails: specifiers it cannot handle are simply left alone.
//! What can fail is everything around it: reading and writing files, walking
//! directories, and `--check` finding work to do.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A path given on the command line does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A source file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A rewritten file could not be written back
    #[error("Failed to write {}: {source}\n\nHint: Check file permissions", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// I/O errors on stdin/stdout
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `--check` found files that would be rewritten
    #[error("{count} file(s) would be rewritten\n\nHint: Run again with --write to apply the changes")]
    ChangesNeeded { count: usize },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert CliError to a miette Report
pub fn cli_error_to_miette(err: CliError) -> miette::Report {
    match err {
        CliError::Read { path, source } => {
            miette::miette!("Failed to read {}: {}", path.display(), source)
        }
        CliError::Walk(e) => miette::miette!("Failed to walk directory: {}", e),
        _ => miette::miette!("{}", err),
    }
}
