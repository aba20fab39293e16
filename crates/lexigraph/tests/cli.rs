//! `lexigraph` binary tests: flags, `words`, `graph`, and error reporting.

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

// =============================================================================
// Help, Version, Info
// =============================================================================

#[test]
fn help_lists_analysis_commands() {
    for flag in ["--help", "-h"] {
        cmd()
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"))
            .stdout(predicate::str::contains("words"))
            .stdout(predicate::str::contains("graph"));
    }
}

#[test]
fn version_flags() {
    for flag in ["--version", "-V"] {
        cmd()
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn info_reports_package_and_analysis_settings() {
    cmd()
        .args(["--color", "never", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains("Language"))
        .stdout(predicate::str::contains("Baseline"));

    let output = cmd().args(["info", "--json"]).assert().success();
    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["config"]["stopwords"].is_object());
}

#[test]
fn subcommand_help_shows_input_options() {
    for sub in ["words", "graph"] {
        cmd()
            .args([sub, "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--sections"))
            .stdout(predicate::str::contains("--baseline"))
            .stdout(predicate::str::contains("--stopwords"));
    }
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn global_flags_accepted_anywhere() {
    let cases: [&[&str]; 7] = [
        &["-q", "info"],
        &["info", "--quiet"],
        &["-v", "info"],
        &["-vv", "info"],
        &["--color", "always", "info"],
        &["info", "--color", "never"],
        &["--color", "auto", "info", "--json"],
    ];
    for args in cases {
        cmd().args(args).assert().success();
    }
}

// =============================================================================
// Usage Errors
// =============================================================================

#[test]
fn missing_subcommand_prints_help() {
    // arg_required_else_help exits with 2
    cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn unknown_subcommand_or_flag_fails() {
    for arg in ["tokens", "--not-a-flag"] {
        cmd()
            .arg(arg)
            .assert()
            .failure()
            .stderr(predicate::str::contains("error:"));
    }
}

#[test]
fn words_rejects_unknown_sort_key() {
    cmd()
        .args(["words", "page.txt", "--sort", "length"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("length"));
}

// =============================================================================
// Words Command
// =============================================================================

/// A temp dir holding `name` with `content`, plus a small baseline table.
fn fixture(name: &str, content: &str) -> tempfile::TempDir {
    let tmp = tempfile::TempDir::new().unwrap();
    std::fs::write(tmp.path().join(name), content).unwrap();
    std::fs::write(
        tmp.path().join("zipf.tsv"),
        "# word\tzipf\ncat\t4.4\nsat\t3.6\nran\t4.2\n",
    )
    .unwrap();
    tmp
}

fn run_json(dir: &std::path::Path, args: &[&str]) -> serde_json::Value {
    let output = cmd()
        .args(["-C", dir.to_str().unwrap()])
        .args(args)
        .arg("--json")
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

#[test]
fn words_counts_and_scores() {
    let tmp = fixture("page.txt", "the cat sat\nthe cat ran\n");
    let json = run_json(tmp.path(), &["words", "page.txt", "--baseline", "zipf.tsv"]);

    assert_eq!(json["sections"], 2);
    assert_eq!(json["tokens"], 6);
    assert_eq!(json["vocabulary"], 3);
    assert_eq!(json["words"][0]["word"], "cat");
    assert_eq!(json["words"][0]["count"], 2);
    assert_eq!(json["words"][0]["anomaly"], 2.01);
}

#[test]
fn words_sort_by_anomaly() {
    let tmp = fixture("page.txt", "the cat sat\nthe cat ran\n");
    let json = run_json(
        tmp.path(),
        &["words", "page.txt", "--baseline", "zipf.tsv", "--sort", "anomaly"],
    );

    assert_eq!(json["sort"], "anomaly");
    let scores: Vec<f64> = json["words"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["anomaly"].as_f64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[test]
fn words_top_limits_rows() {
    let tmp = fixture("page.txt", "alpha beta gamma delta\n");
    let json = run_json(tmp.path(), &["words", "page.txt", "--top", "2"]);
    assert_eq!(json["words"].as_array().unwrap().len(), 2);
    assert_eq!(json["vocabulary"], 4);
}

#[test]
fn words_stopword_file_replaces_defaults() {
    let tmp = fixture("page.txt", "the cat sat\n");
    std::fs::write(tmp.path().join("stop.txt"), "cat\n").unwrap();
    let json = run_json(tmp.path(), &["words", "page.txt", "--stopwords", "stop.txt"]);

    let words: Vec<&str> = json["words"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["word"].as_str().unwrap())
        .collect();
    assert_eq!(words, ["sat", "the"]);
}

#[test]
fn words_markdown_skips_code_blocks() {
    let tmp = fixture(
        "notes.md",
        "# Heading\n\nplain prose\n\n```\nhidden code\n```\n",
    );
    let json = run_json(tmp.path(), &["words", "notes.md"]);

    let words: Vec<&str> = json["words"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["word"].as_str().unwrap())
        .collect();
    assert!(words.contains(&"heading"));
    assert!(words.contains(&"prose"));
    assert!(!words.contains(&"hidden"));
}

#[test]
fn words_text_output_has_table() {
    let tmp = fixture("page.txt", "the cat sat\nthe cat ran\n");
    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "--color", "never"])
        .args(["words", "page.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WORD"))
        .stdout(predicate::str::contains("ANOMALY"))
        .stdout(predicate::str::contains("cat"));
}

#[test]
fn words_empty_file_succeeds() {
    let tmp = fixture("empty.txt", "");
    let json = run_json(tmp.path(), &["words", "empty.txt"]);
    assert_eq!(json["vocabulary"], 0);
    assert!(json["words"].as_array().unwrap().is_empty());
}

#[test]
fn words_missing_file_fails() {
    cmd()
        .args(["words", "/nonexistent/input.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn words_malformed_baseline_fails() {
    let tmp = fixture("page.txt", "cat\n");
    std::fs::write(tmp.path().join("bad.tsv"), "cat\tnot-a-number\n").unwrap();
    cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .args(["words", "page.txt", "--baseline", "bad.tsv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("baseline"));
}

#[test]
fn words_rejects_oversized_input() {
    let tmp = fixture("page.txt", &"word ".repeat(100));
    std::fs::write(tmp.path().join(".lexigraph.toml"), "max_input_bytes = 64\n").unwrap();
    cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .args(["words", "page.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

// =============================================================================
// Graph Command
// =============================================================================

#[test]
fn graph_exports_nodes_and_edges() {
    let tmp = fixture("page.txt", "the cat sat\nthe cat ran\n");
    let json = run_json(tmp.path(), &["graph", "page.txt"]);

    let edges = json["edges"].as_array().unwrap();
    let cat_the = edges
        .iter()
        .find(|e| e["source"] == "cat" && e["target"] == "the")
        .expect("cat/the edge");
    assert_eq!(cat_the["weight"], 2.0);

    // Stopword nodes are kept but carry no statistics.
    let the = json["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["id"] == "the")
        .expect("stopword node present");
    assert!(the.get("count").is_none());
}

#[test]
fn graph_drop_stopwords_removes_nodes() {
    let tmp = fixture("page.txt", "the cat sat\nthe cat ran\n");
    let json = run_json(tmp.path(), &["graph", "page.txt", "--drop-stopwords"]);

    let ids: Vec<&str> = json["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["cat", "ran", "sat"]);
}

#[test]
fn graph_min_weight_filters_edges() {
    let tmp = fixture("page.txt", "the cat sat\nthe cat ran\n");
    let json = run_json(tmp.path(), &["graph", "page.txt", "--min-weight", "1.5"]);

    let edges = json["edges"].as_array().unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0]["source"], "cat");
    assert_eq!(edges[0]["target"], "the");
}

#[test]
fn graph_no_self_edges() {
    let tmp = fixture("page.txt", "go go\n");
    let with = run_json(tmp.path(), &["graph", "page.txt"]);
    assert_eq!(with["edges"].as_array().unwrap().len(), 1);

    let without = run_json(tmp.path(), &["graph", "page.txt", "--no-self-edges"]);
    assert!(without["edges"].as_array().unwrap().is_empty());
}

#[test]
fn graph_output_writes_file() {
    let tmp = fixture("page.txt", "the cat sat\n");
    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "--color", "never"])
        .args(["graph", "page.txt", "--output", "graph.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("graph.json"));

    let written = std::fs::read_to_string(tmp.path().join("graph.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(json["edges"].as_array().unwrap().len(), 3);
}

#[test]
fn graph_text_summary_lists_edges() {
    let tmp = fixture("page.txt", "the cat sat\n");
    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "--color", "never"])
        .args(["graph", "page.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 nodes, 3 edges"));
}

// =============================================================================
// Chdir Flag
// =============================================================================

#[test]
fn chdir_resolves_relative_input() {
    let tmp = fixture("page.txt", "cat sat\n");
    cmd()
        .args(["words", "page.txt"])
        .assert()
        .failure();
    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "words", "page.txt"])
        .assert()
        .success();
}

#[test]
fn chdir_nonexistent_fails() {
    cmd()
        .args(["-C", "/nonexistent/path/that/does/not/exist", "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to change directory"));
}
