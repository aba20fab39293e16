//! Command implementations.

use std::collections::HashSet;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use lexigraph_core::{Analysis, Config, SectionSource, analyze};
use tracing::debug;

pub mod graph;
pub mod info;
pub mod words;

/// Input options shared by every analysis command.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Text file to analyze.
    pub file: Utf8PathBuf,

    /// How to split the file into sections (default: by extension).
    #[arg(long, value_enum)]
    pub sections: Option<SectionSource>,

    /// Stopword file (one word per line), replacing the configured file.
    #[arg(long, value_name = "FILE")]
    pub stopwords: Option<Utf8PathBuf>,

    /// Baseline Zipf table (`word<TAB>zipf` per line).
    #[arg(long, value_name = "FILE")]
    pub baseline: Option<Utf8PathBuf>,

    /// Baseline language code.
    #[arg(long)]
    pub language: Option<String>,
}

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    std::fs::read_to_string(path.as_std_path()).with_context(|| format!("failed to read {path}"))
}

/// Load the input, resolve stopwords and baseline, and run the pipeline.
///
/// Returns the analysis together with the stopword set it used, since the
/// graph command filters nodes with the same set.
pub fn run_analysis(
    input: &InputArgs,
    config: &Config,
) -> anyhow::Result<(Analysis, HashSet<String>)> {
    let mut config = config.clone();
    if let Some(ref language) = input.language {
        config.language = language.clone();
        config.validate().context("invalid --language")?;
    }

    let content = read_input_file(&input.file, config.input_limit())?;
    let source = input
        .sections
        .unwrap_or_else(|| SectionSource::from_extension(input.file.extension()));
    let sections = source.split(&content);
    debug!(file = %input.file, ?source, sections = sections.len(), "input split");

    let stopwords = config
        .stopword_set(input.stopwords.as_deref())
        .context("failed to load stopwords")?;
    let baseline = config
        .baseline(input.baseline.as_deref())
        .context("failed to load baseline table")?;

    let options = config.analysis_options(stopwords.clone());
    let analysis = analyze(&sections, &options, &baseline);
    Ok((analysis, stopwords))
}
