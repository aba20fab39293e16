//! Info command: package metadata and effective configuration.

use clap::Args;
use lexigraph_core::config::{Config, ConfigSources};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    homepage: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            homepage: env!("CARGO_PKG_HOMEPAGE"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    language: String,
    strip_characters: String,
    stopwords: StopwordInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    baseline_file: Option<String>,
    unknown_word_frequency: f64,
    top: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
}

#[derive(Serialize)]
struct StopwordInfo {
    source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
}

impl StopwordInfo {
    fn from_config(config: &Config) -> Self {
        let source = if config.stopwords.is_none() && config.stopwords_file.is_none() {
            "built-in"
        } else {
            "configured"
        };
        Self {
            source,
            inline: config.stopwords.as_ref().map(Vec::len),
            file: config.stopwords_file.as_ref().map(|p| p.to_string()),
        }
    }
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            language: config.language.clone(),
            strip_characters: config.strip_characters.clone(),
            stopwords: StopwordInfo::from_config(config),
            baseline_file: config.baseline_file.as_ref().map(|p| p.to_string()),
            unknown_word_frequency: config.unknown_word_frequency,
            top: config.top,
            max_input_bytes: config.input_limit(),
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information and the effective configuration
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `config` - Loaded configuration
/// * `sources` - Config source metadata from loading
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    let info = PackageInfo::new();

    debug!(json_output = global_json, "executing info command");

    let config_info = ConfigInfo::from_config(config, sources);
    let full_info = FullInfo {
        package: info,
        config: config_info,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
    } else {
        println!(
            "{} {}",
            full_info.package.name.bold(),
            full_info.package.version.green()
        );
        if !full_info.package.description.is_empty() {
            println!("{}", full_info.package.description);
        }
        if !full_info.package.license.is_empty() {
            println!("{}: {}", "License".dimmed(), full_info.package.license);
        }
        if !full_info.package.repository.is_empty() {
            println!(
                "{}: {}",
                "Repository".dimmed(),
                full_info.package.repository.cyan()
            );
        }
        if !full_info.package.homepage.is_empty() {
            println!(
                "{}: {}",
                "Homepage".dimmed(),
                full_info.package.homepage.cyan()
            );
        }

        // Configuration section
        println!();
        println!("{}", "Configuration".bold().underline());
        if let Some(ref path) = full_info.config.config_file {
            println!("{}: {}", "Config file".dimmed(), path.cyan());
        } else {
            println!("{}: {}", "Config file".dimmed(), "none loaded".yellow());
        }
        println!("{}: {}", "Log level".dimmed(), full_info.config.log_level);
        if let Some(ref dir) = full_info.config.log_dir {
            println!("{}: {}", "Log directory".dimmed(), dir);
        }

        let cfg = &full_info.config;
        println!();
        println!("{}", "Analysis".bold().underline());
        println!("{}: {}", "Language".dimmed(), cfg.language);
        println!(
            "{}: {} ({} characters)",
            "Strip characters".dimmed(),
            cfg.strip_characters.escape_unicode().to_string().dimmed(),
            cfg.strip_characters.chars().count()
        );
        match (&cfg.stopwords.file, cfg.stopwords.inline) {
            (None, None) => println!("{}: {}", "Stopwords".dimmed(), cfg.stopwords.source),
            (file, inline) => {
                print_opt("Stopwords (inline)", &inline);
                print_opt("Stopwords file", file);
            }
        }
        match cfg.baseline_file {
            Some(ref path) => println!("{}: {}", "Baseline".dimmed(), path.cyan()),
            None => println!(
                "{}: {}",
                "Baseline".dimmed(),
                "none (every word scored as unknown)".yellow()
            ),
        }
        println!(
            "{}: {:.1}",
            "Unknown word frequency".dimmed(),
            cfg.unknown_word_frequency
        );
        println!("{}: {}", "Top".dimmed(), cfg.top);
        match cfg.max_input_bytes {
            Some(limit) => println!("{}: {} bytes", "Input limit".dimmed(), limit),
            None => println!("{}: {}", "Input limit".dimmed(), "disabled".yellow()),
        }
    }

    Ok(())
}

/// Print an optional numeric value or "(not set)".
fn print_opt<T: std::fmt::Display>(label: &str, value: &Option<T>) {
    match value {
        Some(v) => println!("{}: {}", label.dimmed(), v),
        None => println!("{}: {}", label.dimmed(), "(not set)".dimmed()),
    }
}
