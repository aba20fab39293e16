//! Document-wide word occurrence counting.

use std::collections::{HashMap, HashSet};

use crate::normalize::is_word;

/// Running occurrence counts for every word seen in a document.
///
/// Counts are order-independent: feeding the same multiset of tokens in any
/// section order yields the same map, and two counters can be [merged](Self::merge).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCounts {
    counts: HashMap<String, usize>,
}

impl WordCounts {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every real word in one section's token stream.
    pub fn add_section(&mut self, tokens: &[String]) {
        for token in tokens.iter().filter(|t| is_word(t)) {
            *self.counts.entry(token.clone()).or_insert(0) += 1;
        }
    }

    /// Fold another counter into this one by summing counts.
    pub fn merge(&mut self, other: Self) {
        for (word, count) in other.counts {
            *self.counts.entry(word).or_insert(0) += count;
        }
    }

    /// Occurrences of `word`, or 0 if it was never seen.
    pub fn get(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if no word has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts (the number of real tokens seen).
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Drop stopwords and finish the counting stage.
    ///
    /// The empty token can never be present, so only `stopwords` need
    /// removing.
    pub fn without_stopwords(self, stopwords: &HashSet<String>) -> FilteredCounts {
        let counts = self
            .counts
            .into_iter()
            .filter(|(word, _)| !stopwords.contains(word))
            .collect();
        FilteredCounts { counts }
    }
}

/// Counts after stopword removal.
///
/// This is the hand-off between counting and scoring: its size is the
/// vocabulary size every anomaly score is computed against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredCounts {
    counts: HashMap<String, usize>,
}

impl FilteredCounts {
    /// Number of distinct words left after filtering.
    pub fn vocabulary_size(&self) -> usize {
        self.counts.len()
    }

    /// Iterate over `(word, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(w, c)| (w.as_str(), *c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn counts_words() {
        let mut counts = WordCounts::new();
        counts.add_section(&tokens(&["one", "two", "two", "three", "three", "three"]));
        assert_eq!(counts.get("one"), 1);
        assert_eq!(counts.get("two"), 2);
        assert_eq!(counts.get("three"), 3);
        assert_eq!(counts.get("four"), 0);
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn skips_placeholders() {
        let mut counts = WordCounts::new();
        counts.add_section(&tokens(&["cat", "", "dog", ""]));
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.total(), 2);
        assert_eq!(counts.get(""), 0);
    }

    #[test]
    fn section_order_does_not_matter() {
        let a = tokens(&["red", "blue"]);
        let b = tokens(&["blue", "green", "blue"]);

        let mut forward = WordCounts::new();
        forward.add_section(&a);
        forward.add_section(&b);

        let mut backward = WordCounts::new();
        backward.add_section(&b);
        backward.add_section(&a);

        assert_eq!(forward, backward);
    }

    #[test]
    fn merge_sums_counts() {
        let mut left = WordCounts::new();
        left.add_section(&tokens(&["cat", "sat"]));
        let mut right = WordCounts::new();
        right.add_section(&tokens(&["cat", "ran"]));

        left.merge(right);
        assert_eq!(left.get("cat"), 2);
        assert_eq!(left.get("sat"), 1);
        assert_eq!(left.get("ran"), 1);
    }

    #[test]
    fn stopword_filter_sets_vocabulary_size() {
        let mut counts = WordCounts::new();
        counts.add_section(&tokens(&["the", "cat", "sat", "the", "mat"]));
        let stop: HashSet<String> = ["the".to_string()].into_iter().collect();

        let filtered = counts.without_stopwords(&stop);
        assert_eq!(filtered.vocabulary_size(), 3);
        assert!(filtered.iter().all(|(w, _)| w != "the"));
    }

    #[test]
    fn everything_filtered_is_empty() {
        let mut counts = WordCounts::new();
        counts.add_section(&tokens(&["the", "a"]));
        let stop: HashSet<String> = ["the", "a"].iter().map(|s| (*s).to_string()).collect();
        assert_eq!(counts.without_stopwords(&stop).vocabulary_size(), 0);
    }
}
