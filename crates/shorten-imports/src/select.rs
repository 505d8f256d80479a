//! Picks the replacement specifier from a candidate set.
//!
//! Candidates are ranked by path depth, then by character count. When several
//! candidates share the best rank the original wins if it is among them;
//! otherwise the lexicographically smallest one does, so the choice never
//! depends on the order candidates were generated in.

use std::cmp::Ordering;

use crate::paths::{path_depth, to_posix};

/// A candidate specifier with its ranking key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub specifier: String,
    pub depth: usize,
    pub length: usize,
}

impl Candidate {
    pub fn new(specifier: impl Into<String>) -> Self {
        let specifier = to_posix(&specifier.into());
        Self {
            depth: path_depth(&specifier),
            length: specifier.chars().count(),
            specifier,
        }
    }

    fn rank(&self) -> (usize, usize) {
        (self.depth, self.length)
    }
}

/// Choose the best of `candidates` for a specifier originally written as `original`.
///
/// Returns `None` only when `candidates` is empty. A result equal to the
/// slash-normalized `original` means "leave it alone".
pub fn select<S: AsRef<str>>(candidates: &[S], original: &str) -> Option<String> {
    let mut finalists: Vec<Candidate> = Vec::new();

    for candidate in candidates.iter().map(|c| Candidate::new(c.as_ref())) {
        if finalists.iter().any(|f| f.specifier == candidate.specifier) {
            continue;
        }
        match finalists.first().map(|best| candidate.rank().cmp(&best.rank())) {
            None | Some(Ordering::Equal) => finalists.push(candidate),
            Some(Ordering::Less) => {
                finalists.clear();
                finalists.push(candidate);
            }
            Some(Ordering::Greater) => {}
        }
    }

    let original = to_posix(original);
    if finalists.iter().any(|f| f.specifier == original) {
        return Some(original);
    }

    finalists
        .into_iter()
        .map(|f| f.specifier)
        .min()
}
