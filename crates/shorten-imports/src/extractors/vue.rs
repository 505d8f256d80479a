//! Vue Single File Component (SFC) script extractor.

use memchr::memmem;

use super::{ExtractorError, ScriptBlock, MAX_FILE_SIZE, MAX_SCRIPT_TAGS};

const SCRIPT_OPEN: &[u8] = b"<script";
const SCRIPT_CLOSE: &[u8] = b"</script>";

/// Extract every `<script>` block of a Vue SFC, in document order.
///
/// Tag names match case-insensitively. Template and style sections are never
/// part of the result. Self-closing `<script />` tags have no content and are
/// skipped.
pub fn extract_scripts(source: &str) -> Result<Vec<ScriptBlock<'_>>, ExtractorError> {
    // Enforce file size limit
    if source.len() > MAX_FILE_SIZE {
        return Err(ExtractorError::FileTooLarge {
            size: source.len(),
            max: MAX_FILE_SIZE,
        });
    }

    // ASCII lowering keeps every byte offset valid for `source`
    let lowered = source.to_ascii_lowercase();
    let mut blocks = Vec::new();
    let mut pointer = 0;
    let mut script_count = 0;

    while let Some(block) = parse_script(source, lowered.as_bytes(), &mut pointer)? {
        script_count += 1;
        if script_count > MAX_SCRIPT_TAGS {
            return Err(ExtractorError::TooManyScriptTags {
                count: script_count,
                max: MAX_SCRIPT_TAGS,
            });
        }
        blocks.extend(block);
    }

    Ok(blocks)
}

/// Parses the next script tag at or after `pointer`.
///
/// `bytes` is the ASCII-lowercased form of `source_text`, used for searching.
/// `Ok(None)` means no tags remain; `Ok(Some(None))` is a self-closing tag.
fn parse_script<'a>(
    source_text: &'a str,
    bytes: &[u8],
    pointer: &mut usize,
) -> Result<Option<Option<ScriptBlock<'a>>>, ExtractorError> {
    let script_start = loop {
        let Some(pos) = find_from(bytes, *pointer, SCRIPT_OPEN) else {
            return Ok(None);
        };
        *pointer = pos + SCRIPT_OPEN.len();

        // Skip "<scripts", "<scripting" and the like
        match bytes.get(*pointer) {
            Some(b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'/') | None => break pos,
            Some(_) => continue,
        }
    };

    let tag_end = find_script_closing_angle(bytes, *pointer).ok_or(
        ExtractorError::UnclosedScriptTag {
            position: script_start,
        },
    )?;
    let tag_content = &source_text[*pointer..tag_end];
    *pointer = tag_end + 1;

    if tag_content.ends_with('/') {
        return Ok(Some(None));
    }

    let content_start = *pointer;
    let script_end = find_from(bytes, content_start, SCRIPT_CLOSE).ok_or(
        ExtractorError::UnclosedScriptTag {
            position: script_start,
        },
    )?;
    *pointer = script_end + SCRIPT_CLOSE.len();

    Ok(Some(Some(ScriptBlock {
        source_text: &source_text[content_start..script_end],
        source_offset: content_start,
        lang: attribute_value(tag_content, "lang"),
        is_external: has_attribute(tag_content, "src"),
    })))
}

fn find_from(bytes: &[u8], start: usize, needle: &[u8]) -> Option<usize> {
    memmem::find(bytes.get(start..)?, needle).map(|pos| start + pos)
}

/// Finds the closing `>` of a script tag, handling quoted attributes.
fn find_script_closing_angle(bytes: &[u8], start: usize) -> Option<usize> {
    let mut in_quote = false;
    let mut quote_char = 0u8;

    for (i, &byte) in bytes.get(start..)?.iter().enumerate() {
        match byte {
            b'"' | b'\'' => {
                if !in_quote {
                    in_quote = true;
                    quote_char = byte;
                } else if byte == quote_char {
                    in_quote = false;
                }
            }
            b'>' if !in_quote => return Some(start + i),
            _ => {}
        }
    }

    None
}

/// Text following `name` and its `=` sign, if the tag has that attribute.
///
/// The name must start at a word boundary, so `data-src=` counts as `src`
/// but `datasrc=` does not.
fn attribute_rest<'a>(tag_content: &'a str, name: &str) -> Option<&'a str> {
    tag_content.match_indices(name).find_map(|(pos, _)| {
        let at_boundary = tag_content[..pos]
            .chars()
            .next_back()
            .is_none_or(|c| !(c.is_alphanumeric() || c == '_'));
        if !at_boundary {
            return None;
        }
        tag_content[pos + name.len()..]
            .trim_start()
            .strip_prefix('=')
            .map(str::trim_start)
    })
}

fn has_attribute(tag_content: &str, name: &str) -> bool {
    attribute_rest(tag_content, name).is_some()
}

/// Extracts an attribute value, quoted or not. Empty values count as absent.
fn attribute_value<'a>(tag_content: &'a str, name: &str) -> Option<&'a str> {
    let rest = attribute_rest(tag_content, name)?;
    let value = match rest.strip_prefix(['"', '\'']) {
        Some(quoted) => &quoted[..quoted.find(['"', '\''])?],
        None => {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
                .unwrap_or(rest.len());
            &rest[..end]
        }
    };
    (!value.is_empty()).then_some(value)
}
