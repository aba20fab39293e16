//! Frequency anomaly scoring.
//!
//! A word's observed frequency on the page is put on the same Zipf scale as
//! the baseline (`log10` of occurrences per billion words) and divided by its
//! baseline frequency. Values near 1 mean typical usage; larger values mean
//! the page uses the word more than general language does.

use crate::baseline::{BaselineFrequency, UNKNOWN_WORD};
use crate::error::BaselineResult;

/// Baseline used for words the provider does not know.
pub const DEFAULT_UNKNOWN_WORD_FREQUENCY: f64 = 2.0;

/// Scores words against a baseline provider.
pub struct AnomalyScorer<'a> {
    baseline: &'a dyn BaselineFrequency,
    language: &'a str,
    unknown_word_frequency: f64,
}

impl<'a> AnomalyScorer<'a> {
    /// Create a scorer.
    ///
    /// `unknown_word_frequency` replaces the baseline for unknown words and
    /// must be positive; configuration validation guarantees this for values
    /// coming from a config file.
    pub fn new(
        baseline: &'a dyn BaselineFrequency,
        language: &'a str,
        unknown_word_frequency: f64,
    ) -> Self {
        debug_assert!(unknown_word_frequency > 0.0);
        Self {
            baseline,
            language,
            unknown_word_frequency,
        }
    }

    /// Anomaly score of `word` seen `count` times in a vocabulary of
    /// `vocabulary_size` distinct words.
    ///
    /// Returns the provider's error if the lookup fails; callers decide how
    /// to recover.
    pub fn score(&self, word: &str, count: usize, vocabulary_size: usize) -> BaselineResult<f64> {
        let expected = match self.baseline.zipf_frequency(word, self.language)? {
            f if f == UNKNOWN_WORD => self.unknown_word_frequency,
            f => f,
        };
        let observed = observed_frequency(count, vocabulary_size);
        Ok(round2(observed / expected))
    }
}

/// Observed Zipf-scale frequency: `log10(count / vocabulary_size * 1e9)`.
pub fn observed_frequency(count: usize, vocabulary_size: usize) -> f64 {
    (count as f64 / vocabulary_size.max(1) as f64 * 1e9).log10()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::ZipfTable;
    use crate::error::BaselineError;

    struct Unreachable;

    impl BaselineFrequency for Unreachable {
        fn zipf_frequency(&self, _word: &str, _language: &str) -> BaselineResult<f64> {
            Err(BaselineError::Unavailable("connection refused".to_string()))
        }
    }

    #[test]
    fn observed_frequency_scale() {
        // Every word in a single-word vocabulary: 1e9 per billion.
        assert!((observed_frequency(1, 1) - 9.0).abs() < 1e-12);
        assert!((observed_frequency(1, 10) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn scores_known_word() {
        let table = ZipfTable::from_pairs("en", [("cat", 4.0)]);
        let scorer = AnomalyScorer::new(&table, "en", DEFAULT_UNKNOWN_WORD_FREQUENCY);
        // log10(1/10 * 1e9) = 8, 8 / 4 = 2
        assert_eq!(scorer.score("cat", 1, 10).unwrap(), 2.0);
    }

    #[test]
    fn unknown_word_uses_fallback() {
        let table = ZipfTable::empty("en");
        let scorer = AnomalyScorer::new(&table, "en", 2.0);
        // log10(1/10 * 1e9) = 8, 8 / 2 = 4
        let score = scorer.score("vaarhaft", 1, 10).unwrap();
        assert_eq!(score, 4.0);
        assert!(score.is_finite());
    }

    #[test]
    fn rounds_to_two_places() {
        let table = ZipfTable::from_pairs("en", [("cat", 3.0)]);
        let scorer = AnomalyScorer::new(&table, "en", 2.0);
        // log10(2/3 * 1e9) = 8.8239..., / 3 = 2.9413...
        assert_eq!(scorer.score("cat", 2, 3).unwrap(), 2.94);
    }

    #[test]
    fn observed_is_not_rounded_before_division() {
        let table = ZipfTable::from_pairs("en", [("cat", 0.5)]);
        let scorer = AnomalyScorer::new(&table, "en", 2.0);
        // 8.8239... / 0.5 = 17.6478...; rounding 8.82 first would give 17.64
        assert_eq!(scorer.score("cat", 2, 3).unwrap(), 17.65);
    }

    #[test]
    fn provider_failure_is_returned() {
        let scorer = AnomalyScorer::new(&Unreachable, "en", 2.0);
        assert!(scorer.score("cat", 1, 1).is_err());
    }

    #[test]
    fn deterministic() {
        let table = ZipfTable::from_pairs("en", [("cat", 4.37)]);
        let scorer = AnomalyScorer::new(&table, "en", 2.0);
        let a = scorer.score("cat", 7, 311).unwrap();
        let b = scorer.score("cat", 7, 311).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
