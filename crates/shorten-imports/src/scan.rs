//! Structural scan for module specifier literals.
//!
//! Parses a script region with Oxc and reports the source string of every
//! top-level static import and re-export declaration. String arguments of
//! `import()` or `require()` calls are runtime values and never show up here.

use oxc_allocator::Allocator;
use oxc_ast::ast::{ModuleDeclaration, Statement, StringLiteral};
use oxc_parser::{Parser, ParserReturn};
use oxc_span::SourceType;
use thiserror::Error;

/// Script dialect a region is parsed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptKind {
    Js,
    Jsx,
    Ts,
    Tsx,
}

impl ScriptKind {
    /// Dialect for a file extension (without the dot), if it is a script one.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "js" => Some(Self::Js),
            "jsx" => Some(Self::Jsx),
            "ts" => Some(Self::Ts),
            "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }

    /// Dialect for a `<script lang="...">` value; anything unknown is plain JS.
    pub fn from_lang(lang: Option<&str>) -> Self {
        lang.and_then(Self::from_extension).unwrap_or(Self::Js)
    }

    fn source_type(self) -> SourceType {
        match self {
            // Plain `.js` commonly carries JSX, so both parse with it enabled.
            Self::Js | Self::Jsx => SourceType::jsx(),
            Self::Ts => SourceType::ts(),
            Self::Tsx => SourceType::tsx(),
        }
    }
}

/// A module specifier string literal inside a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecifierLiteral {
    /// Byte offset of the opening quote
    pub start: usize,
    /// Byte offset just past the closing quote
    pub end: usize,
    /// Unescaped specifier text
    pub value: String,
    /// Quote character the literal was written with
    pub quote: char,
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("parse errors: {0}")]
    Parse(String),

    #[error("parser gave up before the end of the input")]
    Panicked,
}

/// The declarations worth inspecting; everything else is `Other`.
enum Declaration<'a, 'b> {
    Import(&'b StringLiteral<'a>),
    ReExport(&'b StringLiteral<'a>),
    Other,
}

impl<'a, 'b> Declaration<'a, 'b> {
    fn classify(stmt: &'b Statement<'a>) -> Self {
        match stmt.as_module_declaration() {
            Some(ModuleDeclaration::ImportDeclaration(import)) => Self::Import(&import.source),
            Some(ModuleDeclaration::ExportNamedDeclaration(named)) => {
                named.source.as_ref().map_or(Self::Other, Self::ReExport)
            }
            Some(ModuleDeclaration::ExportAllDeclaration(all)) => Self::ReExport(&all.source),
            _ => Self::Other,
        }
    }

    fn source(&self) -> Option<&'b StringLiteral<'a>> {
        match self {
            Self::Import(lit) | Self::ReExport(lit) => Some(lit),
            Self::Other => None,
        }
    }
}

/// Locate every specifier literal of a static import or re-export in `source`.
///
/// Any parse error fails the whole region: partially recovered trees are not
/// trusted for rewriting.
pub fn scan_specifiers(source: &str, kind: ScriptKind) -> Result<Vec<SpecifierLiteral>, ScanError> {
    let allocator = Allocator::default();
    let ParserReturn {
        program,
        errors,
        panicked,
        ..
    } = Parser::new(&allocator, source, kind.source_type()).parse();

    if panicked {
        return Err(ScanError::Panicked);
    }
    if !errors.is_empty() {
        let message = errors
            .iter()
            .map(|err| format!("{:?}", err))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(ScanError::Parse(message));
    }

    let literals = program
        .body
        .iter()
        .filter_map(|stmt| Declaration::classify(stmt).source())
        .filter_map(|lit| {
            let start = lit.span.start as usize;
            let end = lit.span.end as usize;
            let quote = source.get(start..end)?.chars().next()?;
            Some(SpecifierLiteral {
                start,
                end,
                value: lit.value.to_string(),
                quote,
            })
        })
        .collect();

    Ok(literals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(source: &str, kind: ScriptKind) -> Vec<String> {
        scan_specifiers(source, kind)
            .unwrap()
            .into_iter()
            .map(|lit| lit.value)
            .collect()
    }

    #[test]
    fn test_finds_imports_and_reexports() {
        let source = r#"
import a from './a';
import './side-effect';
import type { T } from "./types";
export { b } from './b';
export * from './c';
export * as d from './d';
export const local = 1;
"#;
        assert_eq!(
            values(source, ScriptKind::Ts),
            vec!["./a", "./side-effect", "./types", "./b", "./c", "./d"]
        );
    }

    #[test]
    fn test_ignores_runtime_calls() {
        let source = r#"
import a from './a';
const lazy = import('./lazy');
const req = require('./req');
"#;
        assert_eq!(values(source, ScriptKind::Js), vec!["./a"]);
    }

    #[test]
    fn test_offsets_include_quotes() {
        let source = "import x from \"./x\";";
        let lits = scan_specifiers(source, ScriptKind::Js).unwrap();
        assert_eq!(lits.len(), 1);
        assert_eq!(&source[lits[0].start..lits[0].end], "\"./x\"");
        assert_eq!(lits[0].quote, '"');
    }

    #[test]
    fn test_jsx_in_plain_js() {
        let source = "import App from './App';\nconst el = <App />;\n";
        assert_eq!(values(source, ScriptKind::Js), vec!["./App"]);
    }

    #[test]
    fn test_typescript_syntax_needs_ts_kind() {
        let source = "import a from './a';\nconst n: number = 1;\n";
        assert!(scan_specifiers(source, ScriptKind::Js).is_err());
        assert_eq!(values(source, ScriptKind::Ts), vec!["./a"]);
    }

    #[test]
    fn test_parse_error_fails_region() {
        let result = scan_specifiers("import { from './a'", ScriptKind::Ts);
        assert!(result.is_err());
    }

    #[test]
    fn test_script_kind_lookup() {
        assert_eq!(ScriptKind::from_extension("TSX"), Some(ScriptKind::Tsx));
        assert_eq!(ScriptKind::from_extension("vue"), None);
        assert_eq!(ScriptKind::from_lang(Some("ts")), ScriptKind::Ts);
        assert_eq!(ScriptKind::from_lang(Some("coffee")), ScriptKind::Js);
        assert_eq!(ScriptKind::from_lang(None), ScriptKind::Js);
    }
}
