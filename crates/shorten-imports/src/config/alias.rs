//! Path alias mappings (`compilerOptions.paths` entries).
//!
//! Each mapping pairs one alias pattern with one target pattern. The forward
//! direction (`expand`) turns an alias specifier into an absolute target path;
//! the reverse direction (`reverse`) recovers the alias specifier from a
//! concrete module path using a regex compiled from the target pattern.

use std::path::Path;

use path_clean::PathClean;
use regex::Regex;

use crate::paths::{has_known_extension, path_to_posix};

const WILDCARD: char = '*';

/// A single alias pattern → target pattern pair.
#[derive(Debug, Clone)]
pub struct AliasMapping {
    /// Alias key as written in the config, e.g. `@app/*`
    pub alias_pattern: String,
    /// Absolute, slash-normalized target pattern, e.g. `/project/src/*`
    pub target_pattern: String,
    /// Whether the target pattern names a file with a known extension
    pub target_has_extension: bool,
    matcher: Regex,
}

impl AliasMapping {
    /// Build a mapping, resolving `target` against `base_url`.
    ///
    /// Returns `None` when the alias and target disagree on wildcard count or
    /// use more than one wildcard; such entries never take part in resolution.
    pub fn new(alias_pattern: &str, target: &str, base_url: &Path) -> Option<Self> {
        let alias_wildcards = wildcard_count(alias_pattern);
        if alias_wildcards > 1 || alias_wildcards != wildcard_count(target) {
            return None;
        }

        let target_pattern = path_to_posix(&base_url.join(target).clean());
        let matcher = build_wildcard_regex(&target_pattern).ok()?;

        Some(Self {
            alias_pattern: alias_pattern.to_string(),
            target_has_extension: has_known_extension(&target_pattern),
            target_pattern,
            matcher,
        })
    }

    /// Expand `specifier` through this mapping into an absolute target path.
    ///
    /// Exact aliases must match the whole specifier. Wildcard aliases match on
    /// prefix and suffix and substitute the middle into the target pattern.
    pub fn expand(&self, specifier: &str) -> Option<String> {
        let Some((prefix, suffix)) = self.alias_pattern.split_once(WILDCARD) else {
            return (specifier == self.alias_pattern).then(|| self.target_pattern.clone());
        };

        if specifier.len() < prefix.len() + suffix.len()
            || !specifier.starts_with(prefix)
            || !specifier.ends_with(suffix)
        {
            return None;
        }

        let captured = &specifier[prefix.len()..specifier.len() - suffix.len()];
        Some(self.target_pattern.replacen(WILDCARD, captured, 1))
    }

    /// Recover the alias specifier that points at `module_path`, if this
    /// mapping's target pattern covers it.
    pub fn reverse(&self, module_path: &str) -> Option<String> {
        let captures = self.matcher.captures(module_path)?;
        let captured: Vec<&str> = captures
            .iter()
            .skip(1)
            .map(|group| group.map_or("", |m| m.as_str()))
            .collect();
        Some(build_alias_specifier(&self.alias_pattern, &captured))
    }
}

fn wildcard_count(pattern: &str) -> usize {
    pattern.matches(WILDCARD).count()
}

/// Compile a target pattern into an anchored regex with one capture per wildcard.
///
/// Literal text is escaped. Every wildcard but the last is lazy so that
/// earlier captures stay as short as possible.
fn build_wildcard_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let parts: Vec<String> = pattern.split(WILDCARD).map(regex::escape).collect();
    let last = parts.len() - 1;

    let mut source = String::from("^");
    for (index, part) in parts.iter().enumerate() {
        source.push_str(part);
        if index != last {
            source.push_str(if index == last - 1 { "(.+)" } else { "(.+?)" });
        }
    }
    source.push('$');

    Regex::new(&source)
}

/// Replace each wildcard in `alias_pattern` with the matching capture.
pub fn build_alias_specifier(alias_pattern: &str, captures: &[&str]) -> String {
    let mut captures = captures.iter();
    let mut out = String::with_capacity(alias_pattern.len());
    for ch in alias_pattern.chars() {
        if ch == WILDCARD {
            out.push_str(captures.next().copied().unwrap_or(""));
        } else {
            out.push(ch);
        }
    }
    out
}
