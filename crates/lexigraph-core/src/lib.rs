//! Core library for lexigraph.
//!
//! Turns the text sections of a document into two views of its vocabulary:
//! per-word counts scored against a general-language baseline, and a
//! weighted co-occurrence graph of words that appear near each other.
//!
//! # Modules
//!
//! - [`normalize`] - Splitting sections into lowercase, stripped tokens
//! - [`counter`] - Document-wide word counts
//! - [`graph`] - Inverse-distance co-occurrence graph
//! - [`baseline`] - Baseline frequency providers
//! - [`score`] - Frequency anomaly scoring
//! - [`pipeline`] - The end-to-end [`analyze`] entry point
//! - [`sections`] - Splitting plain text and Markdown into sections
//! - [`stopwords`] - Default and file-based stopword lists
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use lexigraph_core::{AnalysisOptions, ZipfTable, analyze};
//!
//! let sections = ["the cat sat", "the cat ran"];
//! let options = AnalysisOptions {
//!     stopwords: ["the".to_string()].into_iter().collect(),
//!     ..AnalysisOptions::default()
//! };
//! let baseline = ZipfTable::from_pairs("en", [("cat", 4.4), ("sat", 3.6), ("ran", 4.2)]);
//!
//! let result = analyze(&sections, &options, &baseline);
//! assert_eq!(result.words["cat"].count, 2);
//! assert_eq!(result.graph.weight("cat", "the"), Some(2.0));
//! ```
#![deny(unsafe_code)]

pub mod baseline;
pub mod config;
pub mod counter;
pub mod error;
pub mod graph;
pub mod normalize;
pub mod pipeline;
pub mod score;
pub mod sections;
pub mod stopwords;

pub use baseline::{BaselineFrequency, UNKNOWN_WORD, ZipfTable};
pub use config::{Config, ConfigLoader, ConfigSources, DEFAULT_MAX_INPUT_BYTES, LogLevel};
pub use error::{BaselineError, ConfigError, ConfigResult, SourceError, SourceResult};
pub use graph::{CooccurrenceGraphBuilder, EdgeKey, GraphExport, WordGraph};
pub use normalize::{StripSet, normalize_section};
pub use pipeline::{Analysis, AnalysisOptions, RankBy, WordStat, analyze};
pub use sections::SectionSource;
