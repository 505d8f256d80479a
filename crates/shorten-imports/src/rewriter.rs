//! Rewrites the import specifiers of one file.
//!
//! [`ImportShortener`] ties the pipeline together: config lookup, resolution,
//! candidate generation and selection run for every static import and
//! re-export specifier, and the resulting edits are spliced back into the
//! text. It never fails: anything that goes wrong leaves the affected
//! specifier, script block, or file exactly as it was.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use path_clean::PathClean;

use crate::cache::ResolutionCache;
use crate::candidates::candidates;
use crate::config::{AliasContext, ConfigLocator};
use crate::error::{Result, ShortenError};
use crate::extractors::extract_scripts;
use crate::paths::{is_inside_root, is_vendor_path, to_posix};
use crate::resolver::ModuleResolver;
use crate::runtime::{NativeRuntime, Runtime};
use crate::scan::{scan_specifiers, ScriptKind};
use crate::select::select;

/// Files the shortener knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A plain script file
    Script(ScriptKind),
    /// A Vue single-file component; only its inline `<script>` blocks are read
    Vue,
}

impl FileKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if ext == "vue" {
            return Some(Self::Vue);
        }
        ScriptKind::from_extension(&ext).map(Self::Script)
    }
}

/// One specifier replacement, in byte offsets of the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Offset of the literal's opening quote
    pub start: usize,
    /// Offset just past the literal's closing quote
    pub end: usize,
    /// Complete replacement literal, quotes included
    pub replacement: String,
    /// Specifier value as written, without quotes
    pub original_specifier: String,
    /// Chosen replacement value, without quotes
    pub new_specifier: String,
}

/// Shortens import specifiers, sharing resolution work across every file of a run.
///
/// The value is `Sync`; hosts may call [`shorten`](Self::shorten) from many
/// threads at once.
///
/// # Example
///
/// ```no_run
/// use shorten_imports::ImportShortener;
/// use std::path::Path;
///
/// let shortener = ImportShortener::new();
/// let source = "import { format } from '../../utils/format';\n";
/// let output = shortener.shorten(source, Some(Path::new("src/features/user/profile.ts")));
/// println!("{output}");
/// ```
#[derive(Debug)]
pub struct ImportShortener {
    runtime: Arc<dyn Runtime>,
    cache: ResolutionCache,
}

impl Default for ImportShortener {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportShortener {
    /// Shortener backed by the real filesystem.
    pub fn new() -> Self {
        Self::with_runtime(Arc::new(NativeRuntime::new()))
    }

    pub fn with_runtime(runtime: Arc<dyn Runtime>) -> Self {
        Self {
            runtime,
            cache: ResolutionCache::new(),
        }
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Forget every cached config and resolution, starting a new run.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn locator(&self) -> ConfigLocator<'_> {
        ConfigLocator::new(self.runtime.as_ref(), &self.cache)
    }

    pub fn resolver(&self) -> ModuleResolver<'_> {
        ModuleResolver::new(self.runtime.as_ref(), &self.cache)
    }

    /// Return `text` with every import specifier replaced by its shortest form.
    ///
    /// Without a file path there is nothing to resolve against and the text
    /// comes back unchanged.
    pub fn shorten(&self, text: &str, file_path: Option<&Path>) -> String {
        let edits = self.plan(text, file_path);
        if edits.is_empty() {
            return text.to_string();
        }
        apply_edits(text, &edits)
    }

    /// The edits [`shorten`](Self::shorten) would apply, in source order.
    pub fn plan(&self, text: &str, file_path: Option<&Path>) -> Vec<Edit> {
        let Some(file_path) = file_path else {
            return Vec::new();
        };
        let Some(kind) = FileKind::from_path(file_path) else {
            return Vec::new();
        };
        // Cheap pre-filter before any parsing or filesystem work
        if !text.contains("import") && !text.contains("export") {
            return Vec::new();
        }

        let file_path = self.absolutize(file_path);
        match self.try_plan(text, &file_path, kind) {
            Ok(edits) => edits,
            Err(e) => {
                tracing::debug!("Leaving {} unchanged: {}", file_path.display(), e);
                Vec::new()
            }
        }
    }

    fn absolutize(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.clean();
        }
        match self.runtime.current_dir() {
            Ok(cwd) => cwd.join(path).clean(),
            Err(_) => path.clean(),
        }
    }

    fn try_plan(&self, text: &str, file_path: &Path, kind: FileKind) -> Result<Vec<Edit>> {
        let dir = file_path.parent().unwrap_or(file_path);
        let context = self
            .locator()
            .locate(dir)
            .ok_or_else(|| ShortenError::ConfigUnavailable(dir.to_path_buf()))?;

        match kind {
            FileKind::Script(kind) => self.plan_region(text, 0, kind, file_path, &context),
            FileKind::Vue => self.plan_vue(text, file_path, &context),
        }
    }

    fn plan_vue(&self, text: &str, file_path: &Path, context: &AliasContext) -> Result<Vec<Edit>> {
        if !text.contains("<script") {
            return Ok(Vec::new());
        }

        let mut edits = Vec::new();
        for block in extract_scripts(text)?.into_iter().filter(|b| !b.is_external) {
            let kind = ScriptKind::from_lang(block.lang);
            match self.plan_region(block.source_text, block.source_offset, kind, file_path, context) {
                Ok(block_edits) => edits.extend(block_edits),
                Err(e) => tracing::debug!(
                    "Skipping script block at byte {} of {}: {}",
                    block.source_offset,
                    file_path.display(),
                    e
                ),
            }
        }
        Ok(edits)
    }

    /// Edits for one script region starting at `offset` in the file.
    fn plan_region(
        &self,
        source: &str,
        offset: usize,
        kind: ScriptKind,
        file_path: &Path,
        context: &AliasContext,
    ) -> Result<Vec<Edit>> {
        let literals = scan_specifiers(source, kind)?;

        let mut edits = Vec::new();
        for literal in literals {
            let shortest = match self.shortest_specifier(&literal.value, file_path, context) {
                Ok(Some(shortest)) => shortest,
                Ok(None) => continue,
                Err(e) => {
                    tracing::trace!("{}", e);
                    continue;
                }
            };

            tracing::debug!(
                "{}: '{}' -> '{}'",
                file_path.display(),
                literal.value,
                shortest
            );
            let quote = literal.quote;
            edits.push(Edit {
                start: offset + literal.start,
                end: offset + literal.end,
                replacement: format!("{quote}{}{quote}", escape_specifier(&shortest, quote)),
                original_specifier: literal.value,
                new_specifier: shortest,
            });
        }
        Ok(edits)
    }

    /// The replacement for `specifier`, or `None` when it is already the best form.
    fn shortest_specifier(
        &self,
        specifier: &str,
        importer: &Path,
        context: &AliasContext,
    ) -> Result<Option<String>> {
        let specifier = to_posix(specifier);
        let resolver = self.resolver();

        let target = resolver
            .resolve(&specifier, importer, context)
            .ok_or_else(|| ShortenError::UnresolvedSpecifier {
                specifier: specifier.clone(),
                from: importer.to_path_buf(),
            })?;

        if !is_inside_root(&target, &context.project_root) || is_vendor_path(&target) {
            return Err(ShortenError::OutOfScopeTarget { specifier, target });
        }

        let found = candidates(&target, &specifier, importer, context, &resolver);
        Ok(select(&found, &specifier).filter(|best| *best != specifier))
    }
}

/// Escape `value` for a string literal delimited by `quote`.
pub fn escape_specifier(value: &str, quote: char) -> String {
    let escaped = value.replace('\\', "\\\\");
    match quote {
        '"' | '\'' => escaped.replace(quote, &format!("\\{quote}")),
        _ => escaped,
    }
}

/// Apply `edits` to `text` back-to-front so earlier offsets stay valid.
///
/// Edits that overlap a later one or do not fall on character boundaries are
/// ignored.
pub fn apply_edits(text: &str, edits: &[Edit]) -> String {
    let mut sorted: Vec<&Edit> = edits.iter().collect();
    sorted.sort_by(|a, b| b.start.cmp(&a.start));

    let mut output = text.to_string();
    let mut floor = text.len();
    for edit in sorted {
        if edit.start > edit.end || edit.end > floor || output.get(edit.start..edit.end).is_none() {
            continue;
        }
        output.replace_range(edit.start..edit.end, &edit.replacement);
        floor = edit.start;
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MemoryRuntime;

    const CONFIG: &str = r#"{ "compilerOptions": { "baseUrl": ".", "paths": { "@app/*": ["src/*"] } } }"#;

    fn shortener() -> ImportShortener {
        let runtime = MemoryRuntime::new()
            .with_file("/p/tsconfig.json", CONFIG)
            .with_file("/p/src/features/user/profile.ts", "")
            .with_file("/p/src/utils/format.ts", "")
            .with_file("/p/src/utils/index.ts", "")
            .with_cwd("/p");
        ImportShortener::with_runtime(Arc::new(runtime))
    }

    fn edit(start: usize, end: usize, replacement: &str) -> Edit {
        Edit {
            start,
            end,
            replacement: replacement.to_string(),
            original_specifier: String::new(),
            new_specifier: String::new(),
        }
    }

    #[test]
    fn test_file_kind() {
        assert_eq!(
            FileKind::from_path(Path::new("a/b.TS")),
            Some(FileKind::Script(ScriptKind::Ts))
        );
        assert_eq!(FileKind::from_path(Path::new("a/b.vue")), Some(FileKind::Vue));
        assert_eq!(FileKind::from_path(Path::new("a/b.mjs")), None);
        assert_eq!(FileKind::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_escape_specifier() {
        assert_eq!(escape_specifier(r"a\b", '\''), r"a\\b");
        assert_eq!(escape_specifier("it's", '\''), r"it\'s");
        assert_eq!(escape_specifier("it's", '"'), "it's");
        assert_eq!(escape_specifier(r#"say "hi""#, '"'), r#"say \"hi\""#);
    }

    #[test]
    fn test_apply_edits_back_to_front() {
        let text = "import a from './a'; import b from './b';";
        let edits = vec![edit(14, 19, "'@x/a'"), edit(35, 40, "'./bb'")];
        assert_eq!(
            apply_edits(text, &edits),
            "import a from '@x/a'; import b from './bb';"
        );
    }

    #[test]
    fn test_apply_edits_skips_overlap() {
        let edits = vec![edit(0, 4, "X"), edit(2, 6, "Y")];
        assert_eq!(apply_edits("abcdefgh", &edits), "abYgh");
    }

    #[test]
    fn test_shortens_relative_to_alias() {
        let source = "import { format } from '../../utils/format';\n";
        let output = shortener().shorten(source, Some(Path::new("src/features/user/profile.ts")));
        assert_eq!(output, "import { format } from '@app/utils/format';\n");
    }

    #[test]
    fn test_plan_reports_edits() {
        let source = "export * from \"../../utils/format\";\n";
        let edits = shortener().plan(source, Some(Path::new("/p/src/features/user/profile.ts")));
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].original_specifier, "../../utils/format");
        assert_eq!(edits[0].new_specifier, "@app/utils/format");
        assert_eq!(edits[0].replacement, "\"@app/utils/format\"");
        assert_eq!(&source[edits[0].start..edits[0].end], "\"../../utils/format\"");
    }

    #[test]
    fn test_pass_through_cases() {
        let s = shortener();
        let source = "import { format } from '../../utils/format';\n";
        assert_eq!(s.shorten(source, None), source);
        assert_eq!(s.shorten(source, Some(Path::new("src/features/user/profile.md"))), source);
        assert_eq!(s.shorten("const a = 1;\n", Some(Path::new("src/a.ts"))), "const a = 1;\n");
        // No config above /elsewhere
        assert_eq!(s.shorten(source, Some(Path::new("/elsewhere/x/y/z.ts"))), source);
    }

    #[test]
    fn test_unresolved_sibling_does_not_block_others() {
        let source = "import a from './missing';\nimport { format } from '../../utils/format';\n";
        let output = shortener().shorten(source, Some(Path::new("/p/src/features/user/profile.ts")));
        assert_eq!(
            output,
            "import a from './missing';\nimport { format } from '@app/utils/format';\n"
        );
    }

    #[test]
    fn test_out_of_scope_targets_are_never_rewritten() {
        let config = r#"{ "compilerOptions": { "baseUrl": ".", "paths": {
            "@vendor/*": ["node_modules/vendor/*"],
            "@ext/*": ["../outside/*"]
        } } }"#;
        let runtime = MemoryRuntime::new()
            .with_file("/p/tsconfig.json", config)
            .with_file("/p/src/features/index.ts", "")
            .with_file("/p/node_modules/vendor/foo.js", "")
            .with_file("/outside/tool.ts", "")
            .with_cwd("/p");
        let s = ImportShortener::with_runtime(Arc::new(runtime));
        let importer = Path::new("/p/src/features/index.ts");

        // Both targets have a shallower alias form that resolves to the same file
        let resolver = s.resolver();
        let context = s.locator().locate(Path::new("/p/src/features")).unwrap();
        let vendored = Some(PathBuf::from("/p/node_modules/vendor/foo.js"));
        assert_eq!(resolver.resolve("@vendor/foo", importer, &context), vendored);
        assert_eq!(
            resolver.resolve("../../node_modules/vendor/foo", importer, &context),
            vendored
        );
        assert_eq!(
            resolver.resolve("@ext/tool", importer, &context),
            Some(PathBuf::from("/outside/tool.ts"))
        );

        let source = "import foo from '../../node_modules/vendor/foo';\nimport { tool } from '../../../outside/tool';\n";
        assert!(s.plan(source, Some(importer)).is_empty());
        assert_eq!(s.shorten(source, Some(importer)), source);
    }

    #[test]
    fn test_clear_cache() {
        let s = shortener();
        s.shorten(
            "import { format } from '../../utils/format';\n",
            Some(Path::new("/p/src/features/user/profile.ts")),
        );
        assert!(s.cache().resolution_count() > 0);
        s.clear_cache();
        assert_eq!(s.cache().resolution_count(), 0);
    }
}
