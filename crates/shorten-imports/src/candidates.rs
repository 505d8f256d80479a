//! Candidate specifier generation.
//!
//! Given the file a specifier resolved to, enumerate every specifier that
//! reaches the same file: the relative form, one form per alias mapping whose
//! target pattern covers the file, and the original specifier itself.

use std::path::Path;

use indexmap::IndexSet;

use crate::config::AliasContext;
use crate::paths::{
    ensure_relative_prefix, path_to_posix, posix_basename, posix_dirname, posix_relative,
    strip_known_extension, to_posix,
};
use crate::resolver::ModuleResolver;

const INDEX_BASENAME: &str = "index";

/// Every specifier that reaches `resolved` from `importer`.
///
/// The original specifier (slash-normalized) is always present. Any other
/// candidate is kept only if it resolves back to `resolved`, so a shortcut
/// that is shadowed by another file never makes it to selection. The
/// original's extension, or lack of one, is carried over to every candidate.
pub fn candidates(
    resolved: &Path,
    original: &str,
    importer: &Path,
    context: &AliasContext,
    resolver: &ModuleResolver<'_>,
) -> Vec<String> {
    let original = to_posix(original);
    let (original_base, original_ext) = strip_known_extension(&original);

    let resolved_posix = path_to_posix(resolved);
    let bases = module_bases(&resolved_posix, original_ext);
    let importer_dir = importer.parent().map(path_to_posix).unwrap_or_default();

    let mut found: IndexSet<String> = IndexSet::new();

    for base in &bases {
        let relative = posix_relative(&importer_dir, base);
        if !relative.is_empty() {
            found.insert(ensure_relative_prefix(&relative));
        }
    }

    for (index, base) in bases.iter().enumerate() {
        for mapping in &context.mappings {
            // Extension-bearing targets name the file itself, never its directory.
            let subject = if !mapping.target_has_extension {
                base.as_str()
            } else if index == 0 {
                resolved_posix.as_str()
            } else {
                continue;
            };
            if let Some(alias) = mapping.reverse(subject) {
                found.insert(strip_known_extension(&alias).0.to_string());
            }
        }
    }

    let mut result: Vec<String> = vec![apply_extension(original_base, original_ext)];
    for base in found {
        let candidate = apply_extension(&base, original_ext);
        if result.contains(&candidate) {
            continue;
        }
        if resolver.resolve(&candidate, importer, context).as_deref() == Some(resolved) {
            result.push(candidate);
        } else {
            tracing::trace!("Dropping '{}': resolves elsewhere", candidate);
        }
    }
    result
}

/// The extension-stripped file path, plus its directory when the file is an
/// implicit index entry and the original specifier carried no extension.
fn module_bases(resolved: &str, original_ext: &str) -> Vec<String> {
    let (base, _) = strip_known_extension(resolved);
    let mut bases = vec![base.to_string()];
    if original_ext.is_empty() && posix_basename(base) == INDEX_BASENAME {
        bases.push(posix_dirname(base).to_string());
    }
    bases
}

/// Re-append the original extension, replacing any known one already present.
fn apply_extension(base: &str, ext: &str) -> String {
    if ext.is_empty() {
        return base.to_string();
    }
    let (stripped, _) = strip_known_extension(base);
    format!("{stripped}{ext}")
}
