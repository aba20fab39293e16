//! Baseline language frequencies.
//!
//! A baseline provider answers "how common is this word in general usage?"
//! on the Zipf scale: `log10` of occurrences per billion words, so `7` is
//! about as common as "the" and `1` is rare. The value [`UNKNOWN_WORD`] means
//! the provider has never seen the word.

use std::collections::HashMap;

use camino::Utf8Path;

use crate::error::{BaselineError, BaselineResult, SourceError, SourceResult};

/// Sentinel returned for words absent from the baseline corpus.
pub const UNKNOWN_WORD: f64 = 0.0;

/// Source of general-language word frequencies.
pub trait BaselineFrequency {
    /// Zipf-scale frequency of `word` in `language`.
    ///
    /// Returns [`UNKNOWN_WORD`] for words the provider does not know, and an
    /// error only when the lookup itself cannot be performed.
    fn zipf_frequency(&self, word: &str, language: &str) -> BaselineResult<f64>;
}

/// In-memory Zipf table for a single language.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZipfTable {
    language: String,
    frequencies: HashMap<String, f64>,
}

impl ZipfTable {
    /// A table that knows no words at all.
    pub fn empty(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            frequencies: HashMap::new(),
        }
    }

    /// Build a table from `(word, zipf)` pairs.
    pub fn from_pairs<I, S>(language: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            language: language.into(),
            frequencies: pairs.into_iter().map(|(w, f)| (w.into(), f)).collect(),
        }
    }

    /// Load a table from a text file.
    ///
    /// Each line holds a word and its Zipf value separated by a tab or a
    /// comma. Blank lines and lines starting with `#` are ignored. Words are
    /// stored lowercased.
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub fn load(language: impl Into<String>, path: &Utf8Path) -> SourceResult<Self> {
        let content = std::fs::read_to_string(path.as_std_path()).map_err(|e| SourceError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let table = Self::parse(language, &content, path)?;
        tracing::debug!(words = table.len(), "baseline table loaded");
        Ok(table)
    }

    fn parse(language: impl Into<String>, content: &str, path: &Utf8Path) -> SourceResult<Self> {
        let mut frequencies = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let malformed = || SourceError::MalformedLine {
                path: path.to_path_buf(),
                line: idx + 1,
                content: line.to_string(),
            };
            let (word, value) = trimmed
                .split_once(['\t', ','])
                .ok_or_else(malformed)?;
            let word = word.trim();
            let value: f64 = value.trim().parse().map_err(|_| malformed())?;
            if word.is_empty() || !value.is_finite() || value < 0.0 {
                return Err(malformed());
            }
            frequencies.insert(word.to_lowercase(), value);
        }
        Ok(Self {
            language: language.into(),
            frequencies,
        })
    }

    /// Language code this table serves.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Number of words in the table.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Returns true if the table knows no words.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

impl BaselineFrequency for ZipfTable {
    fn zipf_frequency(&self, word: &str, language: &str) -> BaselineResult<f64> {
        if !language.eq_ignore_ascii_case(&self.language) {
            return Err(BaselineError::UnsupportedLanguage {
                requested: language.to_string(),
                available: self.language.clone(),
            });
        }
        Ok(self.frequencies.get(word).copied().unwrap_or(UNKNOWN_WORD))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn known_and_unknown_words() {
        let table = ZipfTable::from_pairs("en", [("cat", 4.5), ("sat", 3.9)]);
        assert_eq!(table.zipf_frequency("cat", "en").unwrap(), 4.5);
        assert_eq!(table.zipf_frequency("vaarhaft", "en").unwrap(), UNKNOWN_WORD);
    }

    #[test]
    fn wrong_language_is_an_error() {
        let table = ZipfTable::empty("en");
        let err = table.zipf_frequency("chat", "fr").unwrap_err();
        assert!(matches!(err, BaselineError::UnsupportedLanguage { .. }));
    }

    #[test]
    fn language_match_ignores_case() {
        let table = ZipfTable::from_pairs("en", [("cat", 4.5)]);
        assert_eq!(table.zipf_frequency("cat", "EN").unwrap(), 4.5);
    }

    #[test]
    fn load_tab_and_comma_lines() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("en.tsv");
        fs::write(&path, "# word\tzipf\nthe\t7.73\nCat,4.5\n\nsat\t 3.9\n").unwrap();
        let path = Utf8PathBuf::try_from(path).unwrap();

        let table = ZipfTable::load("en", &path).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.zipf_frequency("the", "en").unwrap(), 7.73);
        assert_eq!(table.zipf_frequency("cat", "en").unwrap(), 4.5);
        assert_eq!(table.zipf_frequency("sat", "en").unwrap(), 3.9);
    }

    #[test]
    fn load_reports_malformed_line_number() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.tsv");
        fs::write(&path, "the\t7.73\ncat four\n").unwrap();
        let path = Utf8PathBuf::try_from(path).unwrap();

        let err = ZipfTable::load("en", &path).unwrap_err();
        assert!(matches!(err, SourceError::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn load_rejects_negative_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("neg.tsv");
        fs::write(&path, "cat\t-1\n").unwrap();
        let path = Utf8PathBuf::try_from(path).unwrap();

        assert!(ZipfTable::load("en", &path).is_err());
    }

    #[test]
    fn load_missing_file() {
        let err = ZipfTable::load("en", Utf8Path::new("/nonexistent/zipf.tsv")).unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }));
    }
}
