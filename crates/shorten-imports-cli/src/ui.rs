//! Status messages and the rewrite report.

use owo_colors::OwoColorize;
use shorten_imports::Edit;
use std::path::Path;

/// Print a success message to stderr.
pub fn success(message: &str, color: bool) {
    if color {
        eprintln!("{} {}", "✓".green().bold(), message);
    } else {
        eprintln!("✓ {}", message);
    }
}

/// Print a warning message to stderr.
pub fn warning(message: &str, color: bool) {
    if color {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    } else {
        eprintln!("⚠ {}", message);
    }
}

/// Format one file's planned rewrites: the path, then one line per edit.
pub fn format_file_report(path: &Path, edits: &[Edit], color: bool) -> String {
    let mut out = if color {
        format!("{}\n", path.display().bold())
    } else {
        format!("{}\n", path.display())
    };
    for edit in edits {
        if color {
            out.push_str(&format!(
                "  {} {} {}\n",
                edit.original_specifier.red(),
                "->".dimmed(),
                edit.new_specifier.green()
            ));
        } else {
            out.push_str(&format!(
                "  {} -> {}\n",
                edit.original_specifier, edit.new_specifier
            ));
        }
    }
    out
}

/// "1 file" / "3 files"
pub fn plural_files(count: usize) -> String {
    if count == 1 {
        "1 file".to_string()
    } else {
        format!("{count} files")
    }
}
