//! Command implementation.
//!
//! Files are planned in parallel with rayon against one shared
//! [`ImportShortener`], so config discovery and resolution happen at most
//! once per key for the whole run. Reporting and writing happen afterwards,
//! in path order, so output is deterministic.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use shorten_imports::{apply_edits, Edit, ImportShortener};

use crate::cli::{Cli, Mode};
use crate::error::{CliError, Result};
use crate::ui;
use crate::walk::collect_files;

/// Planned rewrites for one file.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub source: String,
    pub edits: Vec<Edit>,
}

impl FileOutcome {
    pub fn is_changed(&self) -> bool {
        !self.edits.is_empty()
    }

    pub fn output(&self) -> String {
        apply_edits(&self.source, &self.edits)
    }
}

/// Run the command described by `args`.
pub fn execute(args: Cli, color: bool) -> Result<()> {
    let shortener = ImportShortener::new();

    if let Some(path) = &args.stdin_filepath {
        return shorten_stdin(&shortener, path);
    }

    let files = collect_files(&args.paths)?;
    tracing::debug!("Found {} source file(s)", files.len());

    let outcomes = plan_files(&shortener, &files)?;
    let changed: Vec<&FileOutcome> = outcomes.iter().filter(|o| o.is_changed()).collect();

    match args.mode() {
        Mode::Report => {
            let mut stdout = io::stdout().lock();
            for outcome in &changed {
                write!(
                    stdout,
                    "{}",
                    ui::format_file_report(&outcome.path, &outcome.edits, color)
                )?;
            }
            if !args.quiet {
                report_summary(changed.len(), files.len(), "would be rewritten", color);
            }
        }
        Mode::Write => {
            for outcome in &changed {
                fs::write(&outcome.path, outcome.output()).map_err(|source| CliError::Write {
                    path: outcome.path.clone(),
                    source,
                })?;
                tracing::info!("Rewrote {}", outcome.path.display());
            }
            if !args.quiet {
                report_summary(changed.len(), files.len(), "rewritten", color);
            }
        }
        Mode::Check => {
            for outcome in &changed {
                if !args.quiet {
                    ui::warning(&outcome.path.display().to_string(), color);
                }
            }
            if !changed.is_empty() {
                return Err(CliError::ChangesNeeded {
                    count: changed.len(),
                });
            }
            if !args.quiet {
                ui::success("All import specifiers are already as short as possible", color);
            }
        }
    }

    Ok(())
}

/// Read and plan every file in parallel. Results keep the order of `files`.
pub fn plan_files(shortener: &ImportShortener, files: &[PathBuf]) -> Result<Vec<FileOutcome>> {
    files
        .par_iter()
        .map(|path| {
            let source = fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?;
            let edits = shortener.plan(&source, Some(path));
            Ok(FileOutcome {
                path: path.clone(),
                source,
                edits,
            })
        })
        .collect()
}

fn shorten_stdin(shortener: &ImportShortener, path: &Path) -> Result<()> {
    let mut source = String::new();
    io::stdin().read_to_string(&mut source)?;

    let output = shortener.shorten(&source, Some(path));

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn report_summary(changed: usize, total: usize, verb: &str, color: bool) {
    ui::success(
        &format!(
            "{} of {} {}",
            ui::plural_files(changed),
            total,
            verb
        ),
        color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CONFIG: &str = r#"{ "compilerOptions": { "paths": { "@app/*": ["src/*"] } } }"#;

    fn project(temp: &TempDir) -> PathBuf {
        let root = temp.path().to_path_buf();
        fs::write(root.join("tsconfig.json"), CONFIG).unwrap();
        fs::create_dir_all(root.join("src/utils")).unwrap();
        fs::create_dir_all(root.join("src/features/user")).unwrap();
        fs::write(root.join("src/utils/format.ts"), "export const f = 1;\n").unwrap();
        fs::write(
            root.join("src/features/user/profile.ts"),
            "import { f } from '../../utils/format';\n",
        )
        .unwrap();
        root
    }

    #[test]
    fn test_plan_files_preserves_order_and_reports_edits() {
        let temp = TempDir::new().unwrap();
        let root = project(&temp);
        let files = collect_files(&[root.join("src")]).unwrap();

        let outcomes = plan_files(&ImportShortener::new(), &files).unwrap();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].path, root.join("src/features/user/profile.ts"));
        assert!(outcomes[0].is_changed());
        assert_eq!(outcomes[0].output(), "import { f } from '@app/utils/format';\n");
        assert!(!outcomes[1].is_changed());
    }

    #[test]
    fn test_plan_files_read_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone.ts");
        let result = plan_files(&ImportShortener::new(), &[missing]);
        assert!(matches!(result, Err(CliError::Read { .. })));
    }
}
