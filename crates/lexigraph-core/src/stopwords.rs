//! Stopword lists.
//!
//! The engine never decides what a stopword is. This module only supplies a
//! default list and reads user-provided ones.

use std::collections::HashSet;

use camino::Utf8Path;

use crate::error::{SourceError, SourceResult};
use crate::normalize::StripSet;

/// The 30 most frequent English words.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "to", "and", "of", "a", "in", "i", "is", "that", "for", "you", "it", "on", "with",
    "be", "this", "was", "are", "as", "have", "at", "not", "but", "my", "we", "or", "so", "if",
    "they", "from",
];

/// The default list as an owned set.
pub fn default_stopwords() -> HashSet<String> {
    DEFAULT_STOPWORDS.iter().map(|w| (*w).to_string()).collect()
}

/// Normalize user-supplied stopwords the same way document words are.
pub fn normalize_stopwords<I, S>(words: I, strip: &StripSet) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| strip.normalize(w.as_ref().trim()))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Read a stopword file: one word per line, `#` starts a comment line.
#[tracing::instrument(skip(strip))]
pub fn load_stopword_file(path: &Utf8Path, strip: &StripSet) -> SourceResult<HashSet<String>> {
    let content = std::fs::read_to_string(path.as_std_path()).map_err(|e| SourceError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let words = normalize_stopwords(
        content
            .lines()
            .filter(|line| !line.trim_start().starts_with('#')),
        strip,
    );
    tracing::debug!(count = words.len(), "stopwords loaded");
    Ok(words)
}
