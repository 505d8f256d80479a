//! Script extraction from documents that embed scripts.
//!
//! Only Vue single-file components are recognized. Extraction reports each
//! `<script>` block's content and where it starts in the original file, so
//! offsets found inside a block map straight back to the file.
//!
//! # Usage
//!
//! ```rust
//! use shorten_imports::extractors::extract_scripts;
//!
//! let sfc = "<template><p/></template>\n<script lang=\"ts\">\nimport a from './a'\n</script>\n";
//! let blocks = extract_scripts(sfc).unwrap();
//! assert_eq!(blocks.len(), 1);
//! assert_eq!(blocks[0].lang, Some("ts"));
//! assert_eq!(&sfc[blocks[0].source_offset..][..blocks[0].source_text.len()], blocks[0].source_text);
//! ```

mod vue;

pub use vue::extract_scripts;

/// One `<script>` block found in a component file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptBlock<'a> {
    /// Text between the opening and closing tags
    pub source_text: &'a str,

    /// Byte offset of `source_text` within the original file
    pub source_offset: usize,

    /// Value of the `lang` attribute, if present
    pub lang: Option<&'a str>,

    /// Whether the opening tag carries a `src` attribute
    ///
    /// External blocks load their code from elsewhere and are never rewritten.
    pub is_external: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractorError {
    /// File exceeds maximum allowed size
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge {
        size: usize,
        max: usize,
    },

    /// Too many script tags found in the file
    #[error("Too many script tags: {count} found (max: {max} allowed)")]
    TooManyScriptTags {
        count: usize,
        max: usize,
    },

    /// Script tag opened but never closed
    #[error("Unclosed script tag starting at byte position {position}")]
    UnclosedScriptTag {
        /// Byte position where the unclosed tag begins
        position: usize,
    },
}

/// Maximum file size in bytes (10 MB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Maximum number of script tags to process
pub const MAX_SCRIPT_TAGS: usize = 100;
