//! Slash-normalized path helpers shared by resolution and candidate ranking.
//!
//! Specifiers and module bases are compared as POSIX strings so results do not
//! depend on the host platform's separator.

use std::path::{Component, Path};

/// Extensions tried during resolution, in order.
///
/// Typed forms come first, generic script forms next, then data and markup.
/// The same list decides which trailing extensions count as "known" when a
/// specifier or resolved path is stripped.
pub const RESOLVE_EXTENSIONS: &[&str] = &[
    ".ts", ".tsx", ".d.ts", ".js", ".jsx", ".mjs", ".cjs", ".json", ".vue",
];

/// Directory name that marks vendored third-party code.
pub const VENDOR_DIR: &str = "node_modules";

/// Convert Windows separators to forward slashes.
pub fn to_posix(value: &str) -> String {
    value.replace('\\', "/")
}

/// Slash-normalized string form of a filesystem path.
pub fn path_to_posix(path: &Path) -> String {
    to_posix(&path.to_string_lossy())
}

/// True for specifiers that resolve against the importing file's directory.
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Force an explicit relative marker so a sibling is `./name`, never a bare `name`.
pub fn ensure_relative_prefix(value: &str) -> String {
    if value.is_empty() {
        return "./".to_string();
    }
    if value.starts_with('.') {
        value.to_string()
    } else {
        format!("./{value}")
    }
}

/// Lexically normalize a specifier and drop any leading `./`.
///
/// `.` segments disappear and `name/..` pairs collapse; leading `..` segments
/// of a relative specifier are kept.
pub fn normalize_specifier(value: &str) -> String {
    let posix = to_posix(value);
    let absolute = posix.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in posix.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Number of non-empty path segments once normalized.
pub fn path_depth(value: &str) -> usize {
    normalize_specifier(value)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .count()
}

/// Split a trailing known extension off `value`.
///
/// Returns `(base, extension)`; the extension is empty when none of
/// [`RESOLVE_EXTENSIONS`] matches. The list is tested in order, so
/// `types.d.ts` splits as `("types.d", ".ts")`.
pub fn strip_known_extension(value: &str) -> (&str, &'static str) {
    for ext in RESOLVE_EXTENSIONS {
        if let Some(base) = value.strip_suffix(ext) {
            return (base, ext);
        }
    }
    (value, "")
}

pub fn has_known_extension(value: &str) -> bool {
    RESOLVE_EXTENSIONS.iter().any(|ext| value.ends_with(ext))
}

/// Last segment of a slash-separated path.
pub fn posix_basename(value: &str) -> &str {
    value.rsplit_once('/').map_or(value, |(_, name)| name)
}

/// Everything before the last `/`, or `.` when there is none.
pub fn posix_dirname(value: &str) -> &str {
    match value.rsplit_once('/') {
        Some(("", _)) => "/",
        Some((dir, _)) => dir,
        None => ".",
    }
}

/// Relative path from directory `from` to `to`, both absolute and slash-normalized.
///
/// Returns an empty string when the two are the same path. The result never
/// carries a leading `./`; see [`ensure_relative_prefix`].
pub fn posix_relative(from: &str, to: &str) -> String {
    let from: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    let to: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = vec![".."; from.len() - common];
    parts.extend_from_slice(&to[common..]);
    parts.join("/")
}

/// Whether `path` is `root` or lives below it (both already cleaned).
pub fn is_inside_root(path: &Path, root: &Path) -> bool {
    path.starts_with(root)
}

/// Whether any component of `path` is a vendored-dependency directory.
pub fn is_vendor_path(path: &Path) -> bool {
    path.components()
        .any(|component| matches!(component, Component::Normal(name) if name == VENDOR_DIR))
}
