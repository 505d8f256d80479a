//! # shorten-imports
//!
//! Rewrites JavaScript and TypeScript import specifiers to the shortest form
//! that still reaches the same file: either a relative path or one of the
//! `compilerOptions.paths` aliases declared in the nearest `tsconfig.json`
//! or `jsconfig.json`.
//!
//! ## Features
//!
//! - **Alias aware**: relative specifiers become aliases and vice versa,
//!   whichever is shallower (ties go to the shorter string)
//! - **Stable**: a specifier that is already among the best is never touched,
//!   so running twice gives the same output as running once
//! - **Structural**: only static `import`/`export ... from` declarations are
//!   rewritten; `import()` and `require()` calls are left alone
//! - **Scoped**: targets outside the project or inside `node_modules` are never
//!   rewritten
//! - **Vue support**: inline `<script>` blocks of single-file components
//!
//! ## Quick Start
//!
//! ```no_run
//! use shorten_imports::ImportShortener;
//! use std::path::Path;
//!
//! let shortener = ImportShortener::new();
//! let source = std::fs::read_to_string("src/features/user/profile.ts").unwrap();
//! let output = shortener.shorten(&source, Some(Path::new("src/features/user/profile.ts")));
//! # let _ = output;
//! ```
//!
//! `shorten` is total: unresolvable specifiers, unparsable files and missing
//! configuration all come back unchanged.

pub mod cache;
pub mod candidates;
pub mod config;
pub mod error;
pub mod extractors;
pub mod paths;
pub mod resolver;
pub mod rewriter;
pub mod runtime;
pub mod scan;
pub mod select;

// Re-export primary APIs
pub use cache::{ResolutionCache, ResolutionKey};
pub use candidates::candidates;
pub use config::{AliasContext, AliasMapping, ConfigLocator};
pub use error::{ConfigError, Result, ShortenError};
pub use extractors::{extract_scripts, ExtractorError, ScriptBlock};
pub use resolver::ModuleResolver;
pub use rewriter::{apply_edits, Edit, FileKind, ImportShortener};
pub use runtime::{NativeRuntime, Runtime, RuntimeError};
pub use scan::{scan_specifiers, ScanError, ScriptKind, SpecifierLiteral};
pub use select::select;

#[cfg(any(test, feature = "test-utils"))]
pub use runtime::MemoryRuntime;
