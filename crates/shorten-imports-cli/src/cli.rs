//! Command-line interface definition.
//!
//! Without a mode flag the command lists every file whose import specifiers
//! would change, together with each `old -> new` rewrite. `--write` applies
//! the rewrites in place and `--check` fails when any file would change.
//! `--stdin-filepath` is the formatter-host contract: source on stdin,
//! shortened source on stdout.

use clap::Parser;
use std::path::PathBuf;

/// Rewrite import specifiers to the shortest relative or tsconfig-alias form
#[derive(Parser, Debug)]
#[command(
    name = "shorten-imports",
    version,
    about = "Rewrite import specifiers to the shortest relative or tsconfig-alias form",
    long_about = "Rewrites static import and re-export specifiers in .js, .jsx, .ts, .tsx and .vue\n\
                  files to the shortest specifier that reaches the same file, choosing between\n\
                  relative paths and the `paths` aliases of the nearest tsconfig.json or jsconfig.json."
)]
pub struct Cli {
    /// Files or directories to process
    ///
    /// Directories are walked recursively, honouring .gitignore and skipping
    /// node_modules. Only .js, .jsx, .ts, .tsx and .vue files are read.
    #[arg(value_name = "PATHS", required_unless_present = "stdin_filepath")]
    pub paths: Vec<PathBuf>,

    /// Rewrite files in place
    #[arg(short, long, conflicts_with = "check")]
    pub write: bool,

    /// Exit with an error if any file would be rewritten
    ///
    /// Nothing is written. Useful in CI to keep specifiers short.
    #[arg(short, long)]
    pub check: bool,

    /// Read source from stdin as if it were this file and print the result
    ///
    /// The path is used to find the governing tsconfig.json and to resolve
    /// relative specifiers; the file itself does not need to exist.
    #[arg(long, value_name = "PATH", conflicts_with_all = ["paths", "write", "check"])]
    pub stdin_filepath: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    ///
    /// Shows config discovery, skipped regions and every rewrite.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// What the command does with the planned rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Report,
    Write,
    Check,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.write {
            Mode::Write
        } else if self.check {
            Mode::Check
        } else {
            Mode::Report
        }
    }
}
