//! shorten-imports CLI - rewrite import specifiers to their shortest form.
//!
//! This is the main entry point. It handles command-line argument parsing,
//! logging initialization, and dispatch to the command implementation.

use clap::Parser;
use miette::Result;
use shorten_imports_cli::{cli, commands, error, logger};

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = cli::Cli::parse();

    // Initialize logging based on global flags
    let no_color = args.no_color || !logger::should_use_colors();
    logger::init_logger(args.verbose, args.quiet, no_color);

    // Convert CLI errors to miette diagnostics for error reporting
    commands::execute(args, !no_color).map_err(error::cli_error_to_miette)
}
