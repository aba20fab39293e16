//! Error types for lexigraph-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,

    /// A configuration value is outside its allowed range.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Name of the offending configuration key.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by a baseline frequency provider for a single word.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BaselineError {
    /// The provider has no data for the requested language.
    #[error("no baseline frequencies for language `{requested}` (table is `{available}`)")]
    UnsupportedLanguage {
        /// Language code that was asked for.
        requested: String,
        /// Language code the provider serves.
        available: String,
    },

    /// The provider could not be reached or failed internally.
    #[error("baseline lookup failed: {0}")]
    Unavailable(String),
}

/// Result type alias using [`BaselineError`].
pub type BaselineResult<T> = Result<T, BaselineError>;

/// Errors that can occur while loading word lists and baseline tables from disk.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that failed to load.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line in a baseline table could not be parsed.
    #[error("{path}:{line}: expected `word<TAB>zipf`, got {content:?}")]
    MalformedLine {
        /// File containing the bad line.
        path: Utf8PathBuf,
        /// 1-based line number.
        line: usize,
        /// The raw line text.
        content: String,
    },
}

/// Result type alias using [`SourceError`].
pub type SourceResult<T> = Result<T, SourceError>;
