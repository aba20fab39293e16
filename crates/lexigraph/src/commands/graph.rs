//! Graph command: co-occurrence graph export.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use lexigraph_core::config::Config;
use lexigraph_core::graph::Edge;
use lexigraph_core::{GraphExport, WordGraph};
use owo_colors::OwoColorize;
use tracing::{debug, info, instrument};

use super::{InputArgs, run_analysis};

/// Arguments for the `graph` subcommand.
#[derive(Args, Debug)]
pub struct GraphArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Remove stopword nodes and their edges.
    #[arg(long)]
    pub drop_stopwords: bool,

    /// Remove edges from a word to itself.
    #[arg(long)]
    pub no_self_edges: bool,

    /// Keep only edges at least this heavy.
    #[arg(long, value_name = "WEIGHT")]
    pub min_weight: Option<f64>,

    /// Write the JSON export to FILE instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,

    /// Number of heaviest edges in the text summary (default: `top` from config).
    #[arg(long)]
    pub top: Option<usize>,
}

/// Build, filter, and export the co-occurrence graph of a file.
#[instrument(name = "cmd_graph", skip_all, fields(file = %args.input.file))]
pub fn cmd_graph(args: GraphArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(
        drop_stopwords = args.drop_stopwords,
        no_self_edges = args.no_self_edges,
        min_weight = ?args.min_weight,
        "executing graph command"
    );

    if let Some(weight) = args.min_weight
        && !weight.is_finite()
    {
        anyhow::bail!("--min-weight must be a finite number, got {weight}");
    }

    let (analysis, stopwords) = run_analysis(&args.input, config)?;
    let mut graph = analysis.graph.clone();
    if args.drop_stopwords {
        graph = graph.without_nodes(&stopwords);
    }
    if args.no_self_edges {
        graph = graph.without_self_edges();
    }
    if let Some(weight) = args.min_weight {
        graph = graph.with_min_weight(weight);
    }

    let export = GraphExport::new(&graph, &analysis.words);

    if let Some(ref path) = args.output {
        let json = serde_json::to_string_pretty(&export)?;
        std::fs::write(path, json).with_context(|| format!("failed to write {path}"))?;
        info!(path = %path, nodes = export.nodes.len(), edges = export.edges.len(), "graph written");
        if !global_json {
            println!(
                "{} {} nodes, {} edges -> {}",
                "Wrote".green(),
                export.nodes.len(),
                export.edges.len(),
                path.cyan()
            );
        }
        return Ok(());
    }

    if global_json {
        println!("{}", serde_json::to_string_pretty(&export)?);
        return Ok(());
    }

    print_summary(
        args.input.file.as_str(),
        &graph,
        &export,
        args.top.unwrap_or(config.top),
    );
    Ok(())
}

fn print_summary(file: &str, graph: &WordGraph, export: &GraphExport, top: usize) {
    println!(
        "{} {} nodes, {} edges",
        file.bold(),
        export.nodes.len(),
        graph.edge_count()
    );
    if graph.is_empty() {
        println!("{}", "no edges".yellow());
        return;
    }

    println!();
    for edge in heaviest(&export.edges, top) {
        println!(
            "{:>8.3}  {} {} {}",
            edge.weight,
            edge.source,
            "--".dimmed(),
            edge.target
        );
    }
}

/// Heaviest `limit` edges, ties in input order.
fn heaviest(edges: &[Edge], limit: usize) -> Vec<&Edge> {
    let mut sorted: Vec<&Edge> = edges.iter().collect();
    sorted.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    sorted.truncate(limit);
    sorted
}
