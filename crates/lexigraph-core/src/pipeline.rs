//! Document analysis pipeline.
//!
//! Runs the engine over one document in four explicit stages:
//!
//! 1. **Accumulate** – normalize every section, then count words and build
//!    the co-occurrence graph from the same unfiltered token stream.
//! 2. **Filter** – drop stopwords from the counts (never from the graph).
//! 3. **Size** – the filtered word count is the vocabulary size.
//! 4. **Score** – compute an anomaly score for every remaining word.
//!
//! Baseline failures for individual words are recovered with a score of 0
//! and reported in [`Analysis::baseline_failures`].

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::baseline::BaselineFrequency;
use crate::counter::{FilteredCounts, WordCounts};
use crate::error::BaselineError;
use crate::graph::{CooccurrenceGraphBuilder, WordGraph};
use crate::normalize::{StripSet, normalize_section};
use crate::score::{AnomalyScorer, DEFAULT_UNKNOWN_WORD_FREQUENCY};

/// Statistics for one word of the analyzed document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WordStat {
    /// Occurrences across all sections.
    pub count: usize,
    /// Observed log-frequency divided by baseline log-frequency.
    pub anomaly: f64,
}

/// A baseline lookup that failed and was recovered with a score of 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineFailure {
    /// The word whose lookup failed.
    pub word: String,
    /// What went wrong.
    #[serde(serialize_with = "serialize_display")]
    pub error: BaselineError,
}

fn serialize_display<S: serde::Serializer>(
    error: &BaselineError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Everything the pipeline needs besides the sections and the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    /// Words excluded from the statistics (but not from the graph).
    pub stopwords: HashSet<String>,
    /// Characters trimmed from token boundaries.
    pub strip: StripSet,
    /// Language code passed to the baseline provider.
    pub language: String,
    /// Baseline used for words the provider does not know.
    pub unknown_word_frequency: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            stopwords: HashSet::new(),
            strip: StripSet::default(),
            language: "en".to_string(),
            unknown_word_frequency: DEFAULT_UNKNOWN_WORD_FREQUENCY,
        }
    }
}

/// Ordering for [`Analysis::ranked`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum RankBy {
    /// Most frequent words first.
    #[default]
    Count,
    /// Most over-represented words first.
    Anomaly,
}

/// Result of analyzing one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Number of sections analyzed.
    pub section_count: usize,
    /// Number of words seen before stopword filtering.
    pub token_count: usize,
    /// Per-word statistics, stopwords excluded.
    pub words: BTreeMap<String, WordStat>,
    /// Co-occurrence graph over every word, stopwords included.
    pub graph: WordGraph,
    /// Words whose baseline lookup failed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub baseline_failures: Vec<BaselineFailure>,
}

impl Analysis {
    /// Number of distinct words in the statistics.
    pub fn vocabulary_size(&self) -> usize {
        self.words.len()
    }

    /// Returns true if at least one word was scored without a working baseline.
    pub fn baseline_degraded(&self) -> bool {
        !self.baseline_failures.is_empty()
    }

    /// Top `limit` words in descending order, ties broken alphabetically.
    pub fn ranked(&self, by: RankBy, limit: usize) -> Vec<(&str, WordStat)> {
        let mut ranked: Vec<(&str, WordStat)> =
            self.words.iter().map(|(w, s)| (w.as_str(), *s)).collect();
        match by {
            RankBy::Count => ranked.sort_by(|a, b| b.1.count.cmp(&a.1.count).then(a.0.cmp(b.0))),
            RankBy::Anomaly => {
                ranked.sort_by(|a, b| b.1.anomaly.total_cmp(&a.1.anomaly).then(a.0.cmp(b.0)));
            }
        }
        ranked.truncate(limit);
        ranked
    }
}

/// Analyze a document's sections.
///
/// Never fails as a whole: an empty document yields empty outputs, and a
/// failing baseline only degrades individual scores.
#[tracing::instrument(skip_all, fields(sections = sections.len(), language = %options.language))]
pub fn analyze<S: AsRef<str>>(
    sections: &[S],
    options: &AnalysisOptions,
    baseline: &dyn BaselineFrequency,
) -> Analysis {
    let (counts, graph) = accumulate(sections, &options.strip);
    let token_count = counts.total();
    tracing::debug!(
        distinct = counts.len(),
        tokens = token_count,
        edges = graph.edge_count(),
        "accumulated"
    );

    let filtered = counts.without_stopwords(&options.stopwords);
    let vocabulary_size = filtered.vocabulary_size();
    tracing::debug!(vocabulary_size, "stopwords removed");

    let scorer = AnomalyScorer::new(baseline, &options.language, options.unknown_word_frequency);
    let (words, baseline_failures) = score_all(&filtered, vocabulary_size, &scorer);

    if !baseline_failures.is_empty() {
        tracing::warn!(
            failed = baseline_failures.len(),
            scored = words.len(),
            "baseline lookups failed; affected words scored 0"
        );
    }

    Analysis {
        section_count: sections.len(),
        token_count,
        words,
        graph,
        baseline_failures,
    }
}

/// Normalize, count, and build the graph from one pass over the sections.
fn accumulate<S: AsRef<str>>(sections: &[S], strip: &StripSet) -> (WordCounts, WordGraph) {
    let mut counts = WordCounts::new();
    let mut builder = CooccurrenceGraphBuilder::new();
    for section in sections {
        let tokens = normalize_section(section.as_ref(), strip);
        counts.add_section(&tokens);
        builder.add_section(&tokens);
    }
    (counts, builder.build())
}

fn score_all(
    filtered: &FilteredCounts,
    vocabulary_size: usize,
    scorer: &AnomalyScorer<'_>,
) -> (BTreeMap<String, WordStat>, Vec<BaselineFailure>) {
    let mut words = BTreeMap::new();
    let mut failures = Vec::new();
    for (word, count) in filtered.iter() {
        let anomaly = match scorer.score(word, count, vocabulary_size) {
            Ok(score) => score,
            Err(error) => {
                tracing::warn!(word, error = %error, "baseline lookup failed");
                failures.push(BaselineFailure {
                    word: word.to_string(),
                    error,
                });
                0.0
            }
        };
        words.insert(word.to_string(), WordStat { count, anomaly });
    }
    failures.sort_by(|a, b| a.word.cmp(&b.word));
    (words, failures)
}
