//! Logging and tracing setup.
//!
//! Human-readable events go to stderr. When a log file or directory is
//! configured, events are also written there as JSON lines through a
//! non-blocking writer; keep the returned guard alive until exit so the
//! writer flushes.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_PATH_ENV: &str = "LEXIGRAPH_LOG_PATH";
const LOG_DIR_ENV: &str = "LEXIGRAPH_LOG_DIR";
const DEFAULT_LOG_FILE: &str = "lexigraph.jsonl";

/// Where log files go, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Explicit log file. Takes precedence over `log_dir`.
    pub log_path: Option<PathBuf>,
    /// Directory for `lexigraph.jsonl`.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Read `LEXIGRAPH_LOG_PATH` / `LEXIGRAPH_LOG_DIR`, falling back to the
    /// configured log directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::from_values(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
        )
    }

    fn from_values(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_log_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            log_path: env_path,
            log_dir: env_dir.or(config_log_dir),
        }
    }

    /// Resolved `(directory, file name)` for the JSONL sink.
    fn log_target(&self) -> Option<(PathBuf, String)> {
        if let Some(ref path) = self.log_path {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            let file = path.file_name()?.to_string_lossy().into_owned();
            return Some((dir, file));
        }
        self.log_dir
            .as_ref()
            .map(|dir| (dir.clone(), DEFAULT_LOG_FILE.to_string()))
    }
}

/// Build the event filter.
///
/// `RUST_LOG` wins when set. Otherwise `-q` selects errors only, `-v` debug,
/// `-vv` trace, and without flags the configured level applies.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(level_for(quiet, verbose, config_level))
}

fn level_for(quiet: bool, verbose: u8, config_level: &str) -> &str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => config_level,
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

/// Install the global subscriber.
///
/// Returns the file writer's guard when a log file is configured.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match config.log_target() {
        Some((dir, file)) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(&dir, file);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(guard)
}
