//! Alias configuration discovery.
//!
//! Finds the nearest `tsconfig.json` (or, failing that at the same level,
//! `jsconfig.json`) above a directory and turns its `baseUrl` and `paths`
//! settings into an [`AliasContext`]. Every file under the same config shares
//! one context for the whole run.

mod alias;
pub mod jsonc;

pub use alias::{build_alias_specifier, AliasMapping};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use path_clean::PathClean;
use serde::Deserialize;
use serde_json::Value;

use crate::cache::ResolutionCache;
use crate::error::ConfigError;
use crate::runtime::Runtime;

/// Config file names checked at each directory level, strictest first.
pub const CONFIG_FILE_NAMES: &[&str] = &["tsconfig.json", "jsconfig.json"];

/// Alias settings derived from one config file.
#[derive(Debug, Clone)]
pub struct AliasContext {
    /// Location of the governing config file
    pub config_path: PathBuf,
    /// Directory containing the config file
    pub config_dir: PathBuf,
    /// Directory alias targets are resolved against
    pub base_url: PathBuf,
    /// Normalized `paths` map in declaration order
    pub paths: IndexMap<String, Vec<String>>,
    /// One entry per usable (alias, target) pair, in declaration order
    pub mappings: Vec<AliasMapping>,
    /// Files outside this directory are never rewritten
    pub project_root: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    #[serde(default)]
    compiler_options: RawCompilerOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCompilerOptions {
    #[serde(default)]
    base_url: Option<Value>,
    #[serde(default)]
    paths: Option<Value>,
}

/// Finds and loads the alias context governing a directory.
#[derive(Debug, Clone, Copy)]
pub struct ConfigLocator<'a> {
    runtime: &'a dyn Runtime,
    cache: &'a ResolutionCache,
}

impl<'a> ConfigLocator<'a> {
    pub fn new(runtime: &'a dyn Runtime, cache: &'a ResolutionCache) -> Self {
        Self { runtime, cache }
    }

    /// Alias context for files in `dir`, or `None` when no usable config exists.
    ///
    /// A config that cannot be read, does not parse, or declares no usable
    /// aliases is treated exactly like a missing one.
    pub fn locate(&self, dir: &Path) -> Option<Arc<AliasContext>> {
        let config_path = self.find_config_path(dir)?;
        self.cache.context(&config_path, || {
            match load_context(self.runtime, &config_path) {
                Ok(context) => {
                    tracing::debug!(
                        "Loaded {} alias mapping(s) from {}",
                        context.mappings.len(),
                        config_path.display()
                    );
                    Some(Arc::new(context))
                }
                Err(e) => {
                    tracing::debug!("Ignoring alias config: {}", e);
                    None
                }
            }
        })
    }

    /// Nearest config file at or above `start`.
    pub fn find_config_path(&self, start: &Path) -> Option<PathBuf> {
        self.cache.config_path(start, || {
            start.ancestors().find_map(|dir| {
                CONFIG_FILE_NAMES
                    .iter()
                    .map(|name| dir.join(name))
                    .find(|candidate| self.runtime.is_file(candidate))
            })
        })
    }
}

/// Read and parse one config file into an alias context.
pub fn load_context(runtime: &dyn Runtime, config_path: &Path) -> Result<AliasContext, ConfigError> {
    let config_dir = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let content = runtime
        .read_to_string(config_path)
        .map_err(|source| ConfigError::Read {
            path: config_path.to_path_buf(),
            source,
        })?;
    let raw: RawConfig = jsonc::from_str(&content).map_err(|source| ConfigError::Parse {
        path: config_path.to_path_buf(),
        source,
    })?;

    let paths = raw
        .compiler_options
        .paths
        .as_ref()
        .map(normalize_paths)
        .unwrap_or_default();
    if paths.is_empty() {
        return Err(ConfigError::NoAliases(config_path.to_path_buf()));
    }

    let base_url = match raw.compiler_options.base_url.as_ref().and_then(Value::as_str) {
        Some(base) if !base.is_empty() => config_dir.join(base).clean(),
        _ => config_dir.clone(),
    };

    let mappings: Vec<AliasMapping> = paths
        .iter()
        .flat_map(|(alias, targets)| {
            targets
                .iter()
                .filter_map(|target| AliasMapping::new(alias, target, &base_url))
        })
        .collect();

    Ok(AliasContext {
        config_path: config_path.to_path_buf(),
        project_root: config_dir.clone(),
        config_dir,
        base_url,
        paths,
        mappings,
    })
}

/// Normalize `paths` values to string lists, dropping anything unusable.
fn normalize_paths(value: &Value) -> IndexMap<String, Vec<String>> {
    let Some(entries) = value.as_object() else {
        return IndexMap::new();
    };

    entries
        .iter()
        .filter_map(|(alias, targets)| {
            let targets: Vec<String> = match targets {
                Value::String(target) => vec![target.clone()],
                Value::Array(items) => items
                    .iter()
                    .filter_map(|item| item.as_str().map(String::from))
                    .collect(),
                _ => Vec::new(),
            };
            (!targets.is_empty()).then(|| (alias.clone(), targets))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{MemoryRuntime, NativeRuntime};
    use std::fs;
    use tempfile::TempDir;

    const APP_CONFIG: &str = r#"{
  "compilerOptions": {
    "baseUrl": ".",
    "paths": { "@app/*": ["src/*"] }
  }
}"#;

    fn locate_with(runtime: &dyn Runtime, dir: &str) -> Option<Arc<AliasContext>> {
        let cache = ResolutionCache::new();
        ConfigLocator::new(runtime, &cache).locate(Path::new(dir))
    }

    #[test]
    fn finds_nearest_config_walking_up() {
        let runtime = MemoryRuntime::new().with_file("/p/tsconfig.json", APP_CONFIG);
        let context = locate_with(&runtime, "/p/src/features/user").unwrap();
        assert_eq!(context.config_path, PathBuf::from("/p/tsconfig.json"));
        assert_eq!(context.project_root, PathBuf::from("/p"));
        assert_eq!(context.mappings.len(), 1);
        assert_eq!(context.mappings[0].target_pattern, "/p/src/*");
    }

    #[test]
    fn prefers_tsconfig_over_jsconfig_at_same_level() {
        let runtime = MemoryRuntime::new()
            .with_file("/p/jsconfig.json", r#"{"compilerOptions":{"paths":{"~/*":["lib/*"]}}}"#)
            .with_file("/p/tsconfig.json", APP_CONFIG);
        let context = locate_with(&runtime, "/p/src").unwrap();
        assert_eq!(context.config_path, PathBuf::from("/p/tsconfig.json"));
    }

    #[test]
    fn stops_at_first_level_with_a_config() {
        // The nearer config has no aliases, so the outer one is never consulted.
        let runtime = MemoryRuntime::new()
            .with_file("/p/tsconfig.json", APP_CONFIG)
            .with_file("/p/pkg/jsconfig.json", r#"{"compilerOptions":{}}"#);
        assert!(locate_with(&runtime, "/p/pkg/src").is_none());
    }

    #[test]
    fn returns_none_without_config() {
        let runtime = MemoryRuntime::new();
        assert!(locate_with(&runtime, "/p/src").is_none());
    }

    #[test]
    fn parse_failure_behaves_like_missing_config() {
        let runtime = MemoryRuntime::new().with_file("/p/tsconfig.json", "{ not json");
        assert!(locate_with(&runtime, "/p/src").is_none());
    }

    #[test]
    fn base_url_shifts_targets() {
        let runtime = MemoryRuntime::new().with_file(
            "/p/tsconfig.json",
            r#"{ "compilerOptions": { "baseUrl": "src", "paths": { "@app/*": ["shared/*"] } } }"#,
        );
        let context = locate_with(&runtime, "/p").unwrap();
        assert_eq!(context.base_url, PathBuf::from("/p/src"));
        assert_eq!(context.mappings[0].target_pattern, "/p/src/shared/*");
    }

    #[test]
    fn normalizes_paths_values() {
        let runtime = MemoryRuntime::new().with_file(
            "/p/tsconfig.json",
            r#"{
  // comments and trailing commas are fine
  "compilerOptions": {
    "paths": {
      "@z/*": "z/*",
      "@a/*": ["a/*", 42, null, "b/*",],
      "@bad/*": [1, 2],
      "@mismatch/*": ["src/index.ts"],
    },
  },
}"#,
        );
        let context = locate_with(&runtime, "/p").unwrap();

        let keys: Vec<&str> = context.paths.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["@z/*", "@a/*", "@mismatch/*"]);
        assert_eq!(context.paths["@a/*"], vec!["a/*", "b/*"]);

        let targets: Vec<&str> = context
            .mappings
            .iter()
            .map(|m| m.target_pattern.as_str())
            .collect();
        assert_eq!(targets, vec!["/p/z/*", "/p/a/*", "/p/b/*"]);
    }

    #[test]
    fn reads_config_from_disk() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("jsconfig.json"), APP_CONFIG).unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();

        let runtime = NativeRuntime::new();
        let context = locate_with(&runtime, temp.path().join("src").to_str().unwrap()).unwrap();
        assert_eq!(context.config_path, temp.path().join("jsconfig.json"));
    }

    #[test]
    fn caches_contexts_per_config_file() {
        let runtime = MemoryRuntime::new().with_file("/p/tsconfig.json", APP_CONFIG);
        let cache = ResolutionCache::new();
        let locator = ConfigLocator::new(&runtime, &cache);
        let a = locator.locate(Path::new("/p/src/a")).unwrap();
        let b = locator.locate(Path::new("/p/src/b")).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
