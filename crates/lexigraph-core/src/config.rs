//! Configuration loading and discovery.
//!
//! Settings are merged from several layers, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. User config: `~/.config/lexigraph/config.<ext>`
//! 3. Project config: `.lexigraph.<ext>` or `lexigraph.<ext>` in the
//!    closest directory (walking up from the search root) that has one
//! 4. Explicit files added with [`ConfigLoader::with_file`]
//! 5. `LEXIGRAPH_*` environment variables
//!
//! `<ext>` is one of `toml`, `yaml`, `yml`, `json`. When one directory holds
//! several files they are all merged, dotfiles first.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use lexigraph_core::config::ConfigLoader;
//!
//! let cwd = std::env::current_dir().unwrap();
//! let cwd = Utf8PathBuf::try_from(cwd).expect("current directory is not valid UTF-8");
//! let (config, _sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! println!("language: {}", config.language);
//! ```

use std::collections::HashSet;

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::baseline::ZipfTable;
use crate::error::{ConfigError, ConfigResult, SourceResult};
use crate::normalize::{DEFAULT_STRIP_CHARACTERS, StripSet};
use crate::pipeline::AnalysisOptions;
use crate::score::DEFAULT_UNKNOWN_WORD_FREQUENCY;
use crate::stopwords;

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// Default number of rows in ranked output.
pub const DEFAULT_TOP: usize = 50;

/// The configuration for lexigraph.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files. Nothing is written to disk when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// Language code passed to the baseline provider.
    pub language: String,
    /// Characters trimmed from both ends of every word.
    pub strip_characters: String,
    /// Inline stopword list.
    pub stopwords: Option<Vec<String>>,
    /// File with one stopword per line.
    pub stopwords_file: Option<Utf8PathBuf>,
    /// Baseline Zipf table (`word<TAB>zipf` per line).
    ///
    /// Without one, every word is treated as unknown to the baseline.
    pub baseline_file: Option<Utf8PathBuf>,
    /// Baseline Zipf frequency assumed for words the baseline does not know.
    pub unknown_word_frequency: f64,
    /// Number of rows shown in ranked output.
    pub top: usize,
    /// Maximum input size in bytes. Omit to use the default (5 MiB).
    pub max_input_bytes: Option<usize>,
    /// Disable the input size limit entirely.
    pub disable_input_limit: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            log_dir: None,
            language: "en".to_string(),
            strip_characters: DEFAULT_STRIP_CHARACTERS.to_string(),
            stopwords: None,
            stopwords_file: None,
            baseline_file: None,
            unknown_word_frequency: DEFAULT_UNKNOWN_WORD_FREQUENCY,
            top: DEFAULT_TOP,
            max_input_bytes: None,
            disable_input_limit: false,
        }
    }
}

impl Config {
    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.unknown_word_frequency.is_finite() || self.unknown_word_frequency <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "unknown_word_frequency",
                reason: format!("must be a positive number, got {}", self.unknown_word_frequency),
            });
        }
        if self.language.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "language",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// The configured strip characters as a [`StripSet`].
    pub fn strip_set(&self) -> StripSet {
        StripSet::new(&self.strip_characters)
    }

    /// Input size limit, or `None` when disabled.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(DEFAULT_MAX_INPUT_BYTES))
        }
    }

    /// Effective stopword set.
    ///
    /// The inline list and the file (either may come from `extra_file`,
    /// which overrides `stopwords_file`) are unioned. With neither, the
    /// built-in English list is used.
    pub fn stopword_set(&self, extra_file: Option<&Utf8Path>) -> SourceResult<HashSet<String>> {
        let strip = self.strip_set();
        let file = extra_file.or(self.stopwords_file.as_deref());
        if self.stopwords.is_none() && file.is_none() {
            return Ok(stopwords::default_stopwords());
        }
        let mut set = self
            .stopwords
            .as_ref()
            .map(|words| stopwords::normalize_stopwords(words, &strip))
            .unwrap_or_default();
        if let Some(path) = file {
            set.extend(stopwords::load_stopword_file(path, &strip)?);
        }
        Ok(set)
    }

    /// Baseline table from `override_file` or `baseline_file`, or an empty one.
    pub fn baseline(&self, override_file: Option<&Utf8Path>) -> SourceResult<ZipfTable> {
        match override_file.or(self.baseline_file.as_deref()) {
            Some(path) => ZipfTable::load(self.language.clone(), path),
            None => Ok(ZipfTable::empty(self.language.clone())),
        }
    }

    /// Pipeline options for the given stopword set.
    pub fn analysis_options(&self, stopwords: HashSet<String>) -> AnalysisOptions {
        AnalysisOptions {
            stopwords,
            strip: self.strip_set(),
            language: self.language.clone(),
            unknown_word_frequency: self.unknown_word_frequency,
        }
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Which configuration files were merged by [`ConfigLoader::load`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project config files, ordered low→high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file from the XDG config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Explicit config files (e.g., from `--config`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The highest-precedence file that was loaded.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }
}

const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

const APP_NAME: &str = "lexigraph";

/// Builder for loading configuration from multiple sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    project_search_root: Option<Utf8PathBuf>,
    include_user_config: bool,
    boundary_marker: Option<String>,
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a loader that includes user config and stops at `.git`.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Walk up from `path` looking for project config files.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include user config from `~/.config/lexigraph/`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Stop the upward search at a directory containing `marker`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Search all the way to the filesystem root.
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file. Later files take precedence.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Merge all sources, validate, and report which files were used.
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        if self.include_user_config
            && let Some(user_config) = Self::find_user_config()
        {
            figment = Self::merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        if let Some(ref root) = self.project_search_root {
            let project_configs = self.find_project_configs(root);
            for pc in &project_configs {
                figment = Self::merge_file(figment, pc);
            }
            sources.project_files = project_configs;
        }

        for file in &self.explicit_files {
            figment = Self::merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        // LEXIGRAPH_LANGUAGE=de, LEXIGRAPH_LOG_LEVEL=debug, etc.
        figment = figment.merge(Env::prefixed("LEXIGRAPH_").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        config.validate()?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            language = %config.language,
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Like [`load`](Self::load), but fails if no config file exists.
    pub fn load_or_error(self) -> ConfigResult<(Config, ConfigSources)> {
        let has_user = self.include_user_config && Self::find_user_config().is_some();
        let has_project = self
            .project_search_root
            .as_ref()
            .is_some_and(|root| !self.find_project_configs(root).is_empty());
        if !has_user && !has_project && self.explicit_files.is_empty() {
            return Err(ConfigError::NotFound);
        }
        self.load()
    }

    /// Config files from the closest directory that has any, low→high precedence.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let found: Vec<Utf8PathBuf> = CONFIG_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!(".{APP_NAME}.{ext}")))
                .chain(
                    CONFIG_EXTENSIONS
                        .iter()
                        .map(|ext| dir.join(format!("{APP_NAME}.{ext}"))),
                )
                .filter(|p| p.is_file())
                .collect();

            if !found.is_empty() {
                return found;
            }

            // The marker directory itself is still searched above.
            if let Some(ref marker) = self.boundary_marker
                && dir.join(marker).exists()
                && dir != start
            {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }

    fn find_user_config() -> Option<Utf8PathBuf> {
        let config_dir = user_config_dir()?;
        CONFIG_EXTENSIONS
            .iter()
            .map(|ext| config_dir.join(format!("config.{ext}")))
            .find(|p| p.is_file())
    }

    fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
        match path.extension() {
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
            Some("json") => figment.merge(Json::file_exact(path.as_str())),
            _ => figment.merge(Toml::file_exact(path.as_str())),
        }
    }
}

/// The user config directory (`~/.config/lexigraph/` on Linux).
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}
