//! Words command: ranked word counts and anomaly scores.

use clap::Args;
use lexigraph_core::config::Config;
use lexigraph_core::pipeline::BaselineFailure;
use lexigraph_core::{Analysis, RankBy, WordStat};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use super::{InputArgs, run_analysis};

/// Arguments for the `words` subcommand.
#[derive(Args, Debug)]
pub struct WordsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Order of the ranking.
    #[arg(long, value_enum, default_value_t)]
    pub sort: RankBy,

    /// Number of words to show (default: `top` from config).
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Serialize)]
struct RankedWord<'a> {
    word: &'a str,
    count: usize,
    anomaly: f64,
}

#[derive(Serialize)]
struct WordsReport<'a> {
    file: &'a str,
    sections: usize,
    tokens: usize,
    vocabulary: usize,
    sort: RankBy,
    words: Vec<RankedWord<'a>>,
    #[serde(skip_serializing_if = "<[BaselineFailure]>::is_empty")]
    baseline_failures: &'a [BaselineFailure],
}

impl<'a> WordsReport<'a> {
    fn new(file: &'a str, analysis: &'a Analysis, sort: RankBy, top: usize) -> Self {
        let words = analysis
            .ranked(sort, top)
            .into_iter()
            .map(|(word, WordStat { count, anomaly })| RankedWord {
                word,
                count,
                anomaly,
            })
            .collect();
        Self {
            file,
            sections: analysis.section_count,
            tokens: analysis.token_count,
            vocabulary: analysis.vocabulary_size(),
            sort,
            words,
            baseline_failures: &analysis.baseline_failures,
        }
    }
}

/// Rank the words of a file by count or anomaly.
#[instrument(name = "cmd_words", skip_all, fields(file = %args.input.file))]
pub fn cmd_words(args: WordsArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(sort = ?args.sort, top = ?args.top, "executing words command");

    let (analysis, _) = run_analysis(&args.input, config)?;

    let top = args.top.unwrap_or(config.top);
    let report = WordsReport::new(args.input.file.as_str(), &analysis, args.sort, top);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} sections, {} tokens, {} distinct words",
        report.file.bold(),
        report.sections,
        report.tokens,
        report.vocabulary,
    );
    if report.words.is_empty() {
        println!("{}", "no words left after stopword filtering".yellow());
        return Ok(());
    }

    let width = report
        .words
        .iter()
        .map(|w| w.word.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);
    println!();
    println!(
        "{:<width$}  {:>7}  {:>7}",
        "WORD".dimmed(),
        "COUNT".dimmed(),
        "ANOMALY".dimmed(),
    );
    for word in &report.words {
        let anomaly = format!("{:>7.2}", word.anomaly);
        let anomaly = if word.anomaly > 1.0 {
            anomaly.red().to_string()
        } else {
            anomaly
        };
        println!("{:<width$}  {:>7}  {}", word.word, word.count, anomaly);
    }

    if analysis.baseline_degraded() {
        println!();
        println!(
            "{} baseline lookup failed for {} word(s); first error: {}",
            "WARN:".yellow(),
            analysis.baseline_failures.len(),
            analysis.baseline_failures[0].error,
        );
    }

    Ok(())
}
