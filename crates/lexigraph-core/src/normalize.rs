//! Section normalization.
//!
//! Turns one section of extracted text into an ordered list of tokens. The
//! section is split at every single whitespace character, the configured
//! strip characters are trimmed from both ends of each piece, and the result
//! is lowercased.
//!
//! Pieces that end up empty (a run of whitespace, or a piece made only of
//! strip characters such as a lone `-`) are kept as placeholders. They hold a
//! position, so distances between the real words around them stay true to
//! the source text, but they are never counted and never become graph nodes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Characters trimmed from token boundaries unless configured otherwise.
pub const DEFAULT_STRIP_CHARACTERS: &str = "(.,:;?!&*|_-\u{2013}\"'\u{201e}\u{201c}\u{201d}\u{ab}\u{bb}<>)";

/// Set of characters removed from both ends of every raw word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct StripSet {
    chars: BTreeSet<char>,
}

impl StripSet {
    /// Build a strip set from every character in `chars`.
    pub fn new(chars: &str) -> Self {
        Self {
            chars: chars.chars().collect(),
        }
    }

    /// Returns true if `c` is trimmed from token boundaries.
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// Trim this set from both ends of `raw` and lowercase the remainder.
    pub fn normalize(&self, raw: &str) -> String {
        raw.trim_matches(|c: char| self.contains(c)).to_lowercase()
    }
}

impl Default for StripSet {
    fn default() -> Self {
        Self::new(DEFAULT_STRIP_CHARACTERS)
    }
}

impl From<String> for StripSet {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<StripSet> for String {
    fn from(value: StripSet) -> Self {
        value.chars.into_iter().collect()
    }
}

/// Normalize a section into positional tokens.
///
/// The returned vector has one entry per whitespace-separated position,
/// including empty placeholders. Use [`is_word`] to skip placeholders.
pub fn normalize_section(section: &str, strip: &StripSet) -> Vec<String> {
    if section.trim().is_empty() {
        return Vec::new();
    }
    section
        .split(char::is_whitespace)
        .map(|raw| strip.normalize(raw))
        .collect()
}

/// Returns true if a token is a real word rather than a positional placeholder.
pub fn is_word(token: &str) -> bool {
    !token.is_empty()
}
