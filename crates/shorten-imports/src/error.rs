//! Error types for import shortening.
//!
//! None of these escape the public `shorten`/`plan` entry points: each one
//! downgrades to "leave this specifier, region, or file unchanged" at the
//! narrowest scope it applies to. They exist so internal steps can use `?`
//! and so the reason for skipping something shows up in debug logs.

use std::path::PathBuf;

use thiserror::Error;

use crate::extractors::ExtractorError;
use crate::runtime::RuntimeError;
use crate::scan::ScanError;

pub type Result<T> = std::result::Result<T, ShortenError>;

#[derive(Debug, Error)]
pub enum ShortenError {
    /// No usable tsconfig/jsconfig governs the directory
    #[error("no alias configuration governs {}", .0.display())]
    ConfigUnavailable(PathBuf),

    /// The specifier does not map to an existing file
    #[error("cannot resolve '{specifier}' from {}", from.display())]
    UnresolvedSpecifier { specifier: String, from: PathBuf },

    /// The target lies outside the project root or inside vendored code
    #[error("'{specifier}' resolves outside the project: {}", target.display())]
    OutOfScopeTarget { specifier: String, target: PathBuf },

    /// A script region could not be parsed
    #[error("structural scan failed: {0}")]
    StructuralScan(#[from] ScanError),

    /// Script blocks could not be extracted from an embedding document
    #[error("script extraction failed: {0}")]
    Extraction(#[from] ExtractorError),
}

/// Failures while loading an alias configuration file.
///
/// A config that fails to load behaves exactly like a missing config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no usable path aliases in {}", .0.display())]
    NoAliases(PathBuf),
}
