//! Development tasks for the lexigraph workspace.
//!
//! ```text
//! cargo run -p xtask -- man [--out-dir DIR]
//! cargo run -p xtask -- completions [--out-dir DIR]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "lexigraph development tasks")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for the CLI and its subcommands
    Man {
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
    /// Generate shell completion scripts
    Completions {
        #[arg(long, default_value = "target/completions")]
        out_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    match Xtask::parse().task {
        Task::Man { out_dir } => man(&out_dir),
        Task::Completions { out_dir } => completions(&out_dir),
    }
}

fn man(out_dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let cmd = lexigraph::command();
    clap_mangen::generate_to(cmd, out_dir)
        .with_context(|| format!("failed to write man pages to {}", out_dir.display()))?;
    println!("man pages written to {}", out_dir.display());
    Ok(())
}

fn completions(out_dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
        let mut cmd = lexigraph::command();
        let path = clap_complete::generate_to(shell, &mut cmd, "lexigraph", out_dir)
            .with_context(|| format!("failed to generate {shell} completions"))?;
        println!("{}", path.display());
    }
    Ok(())
}
