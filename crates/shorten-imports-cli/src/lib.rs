//! shorten-imports CLI.
//!
//! Drives [`shorten_imports::ImportShortener`] over files on disk the way a
//! formatter would: once per file, with one shared resolution cache per run.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions
//! - [`commands`] - Report, check, write and stdin modes
//! - [`error`] - Error types and their miette conversion
//! - [`logger`] - Structured logging with tracing
//! - [`walk`] - Source file discovery

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;
pub mod walk;

// Re-export commonly used types
pub use error::{CliError, Result};
