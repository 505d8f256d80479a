//! Module resolution.
//!
//! Resolves a specifier, relative to the file that imports it, to a file on
//! disk:
//! 1. Relative specifiers resolve from the importer's directory
//! 2. Anything else is expanded through each alias mapping in declaration order
//! 3. Each candidate path tries extensions, then directory index files
//!
//! Bare package imports simply fail to resolve. That is expected and is not
//! an error: the caller leaves such specifiers alone.

mod extensions;

pub use extensions::{resolve_with_extensions, try_extensions, try_index_files};

use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::cache::{ResolutionCache, ResolutionKey};
use crate::config::AliasContext;
use crate::paths::is_relative_specifier;
use crate::runtime::Runtime;

/// Module resolver backed by the run's resolution cache.
#[derive(Debug, Clone, Copy)]
pub struct ModuleResolver<'a> {
    runtime: &'a dyn Runtime,
    cache: &'a ResolutionCache,
}

impl<'a> ModuleResolver<'a> {
    pub fn new(runtime: &'a dyn Runtime, cache: &'a ResolutionCache) -> Self {
        Self { runtime, cache }
    }

    /// Resolve `specifier` as imported from `importer`.
    ///
    /// Returns a cleaned absolute path to an existing file, or `None`.
    pub fn resolve(
        &self,
        specifier: &str,
        importer: &Path,
        context: &AliasContext,
    ) -> Option<PathBuf> {
        let key = ResolutionKey::new(importer, specifier, &context.config_path);
        self.cache
            .resolution(key, || self.resolve_uncached(specifier, importer, context))
    }

    fn resolve_uncached(
        &self,
        specifier: &str,
        importer: &Path,
        context: &AliasContext,
    ) -> Option<PathBuf> {
        let resolved = if is_relative_specifier(specifier) {
            let base = importer.parent()?.join(specifier).clean();
            resolve_with_extensions(&base, self.runtime)
        } else {
            context
                .mappings
                .iter()
                .filter_map(|mapping| mapping.expand(specifier))
                .find_map(|expanded| {
                    resolve_with_extensions(&PathBuf::from(expanded).clean(), self.runtime)
                })
        };

        if resolved.is_none() {
            tracing::trace!(
                "Unresolved '{}' from {}",
                specifier,
                importer.display()
            );
        }
        resolved.map(|path| path.clean())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLocator;
    use crate::runtime::MemoryRuntime;

    const CONFIG: &str = r#"{
  "compilerOptions": {
    "paths": {
      "@app/*": ["src/*", "generated/*"],
      "@config": ["src/config.ts"]
    }
  }
}"#;

    fn runtime() -> MemoryRuntime {
        MemoryRuntime::new()
            .with_file("/p/tsconfig.json", CONFIG)
            .with_file("/p/src/index.ts", "")
            .with_file("/p/src/utils/format.ts", "")
            .with_file("/p/src/utils/index.ts", "")
            .with_file("/p/src/config.ts", "")
            .with_file("/p/generated/schema.ts", "")
    }

    fn resolve(runtime: &MemoryRuntime, specifier: &str, importer: &str) -> Option<PathBuf> {
        let cache = ResolutionCache::new();
        let context = ConfigLocator::new(runtime, &cache)
            .locate(Path::new(importer).parent().unwrap())
            .unwrap();
        ModuleResolver::new(runtime, &cache).resolve(specifier, Path::new(importer), &context)
    }

    #[test]
    fn test_resolve_relative() {
        let rt = runtime();
        assert_eq!(
            resolve(&rt, "./utils/format", "/p/src/index.ts"),
            Some(PathBuf::from("/p/src/utils/format.ts"))
        );
        assert_eq!(
            resolve(&rt, "../src/utils", "/p/src/index.ts"),
            Some(PathBuf::from("/p/src/utils/index.ts"))
        );
    }

    #[test]
    fn test_resolve_alias_in_declaration_order() {
        let rt = runtime();
        assert_eq!(
            resolve(&rt, "@app/utils/format", "/p/src/index.ts"),
            Some(PathBuf::from("/p/src/utils/format.ts"))
        );
        // Falls through to the second target pattern.
        assert_eq!(
            resolve(&rt, "@app/schema", "/p/src/index.ts"),
            Some(PathBuf::from("/p/generated/schema.ts"))
        );
    }

    #[test]
    fn test_resolve_exact_alias() {
        let rt = runtime();
        assert_eq!(
            resolve(&rt, "@config", "/p/src/index.ts"),
            Some(PathBuf::from("/p/src/config.ts"))
        );
    }

    #[test]
    fn test_bare_package_is_unresolved() {
        let rt = runtime();
        assert_eq!(resolve(&rt, "react", "/p/src/index.ts"), None);
        assert_eq!(resolve(&rt, "./missing", "/p/src/index.ts"), None);
    }

    #[test]
    fn test_results_are_cached() {
        let rt = runtime();
        let cache = ResolutionCache::new();
        let context = ConfigLocator::new(&rt, &cache)
            .locate(Path::new("/p/src"))
            .unwrap();
        let resolver = ModuleResolver::new(&rt, &cache);
        let importer = Path::new("/p/src/index.ts");

        resolver.resolve("./utils/format", importer, &context);
        resolver.resolve("./utils/format", importer, &context);
        resolver.resolve("react", importer, &context);
        assert_eq!(cache.resolution_count(), 2);
    }
}
