//! Lenient JSON reading for tsconfig/jsconfig files.
//!
//! TypeScript accepts `//` and `/* */` comments plus trailing commas in its
//! config files. Both are removed (string-aware) before handing the text to
//! `serde_json`.

use std::iter::Peekable;
use std::str::Chars;

use serde::de::DeserializeOwned;

/// Parse comment- and trailing-comma-tolerant JSON.
pub fn from_str<T: DeserializeOwned>(input: &str) -> serde_json::Result<T> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let stripped = strip_trailing_commas(&strip_comments(input));
    serde_json::from_str(&stripped)
}

/// Strip `//` line and `/* */` block comments while respecting strings.
pub fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                out.push(ch);
                copy_string_body(&mut chars, &mut out);
            }
            '/' if chars.peek() == Some(&'/') => {
                while chars.next_if(|&c| c != '\n').is_some() {}
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
                out.push(' ');
            }
            _ => out.push(ch),
        }
    }

    out
}

/// Drop commas that directly precede a closing `}` or `]`.
pub fn strip_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in input.char_indices() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
            }
            ',' if input[i + 1..].trim_start().starts_with(['}', ']']) => {}
            _ => out.push(ch),
        }
    }

    out
}

/// Copy the rest of a string literal (after its opening quote) verbatim.
fn copy_string_body(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    while let Some(c) = chars.next() {
        out.push(c);
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else if c == '"' {
            break;
        }
    }
}
