//! Developer tasks for the richtext-lint workspace.
//!
//! ```text
//! cargo xtask man          # man pages into target/dist/man
//! cargo xtask completions  # shell completions into target/dist/completions
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation")]
struct Xtask {
    #[command(subcommand)]
    task: Task,

    /// Output directory
    #[arg(long, global = true, default_value = "target/dist")]
    out_dir: PathBuf,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for the CLI and its subcommands
    Man,
    /// Generate shell completion scripts
    Completions,
}

fn main() -> anyhow::Result<()> {
    let xtask = Xtask::parse();
    match xtask.task {
        Task::Man => generate_man(&xtask.out_dir.join("man")),
        Task::Completions => generate_completions(&xtask.out_dir.join("completions")),
    }
}

fn generate_man(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let cmd = richtext_lint::command();
    clap_mangen::generate_to(cmd, dir).context("failed to write man pages")?;
    println!("man pages written to {}", dir.display());
    Ok(())
}

fn generate_completions(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let mut cmd = richtext_lint::command();
    let name = cmd.get_name().to_string();
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
        let path = clap_complete::generate_to(shell, &mut cmd, &name, dir)
            .with_context(|| format!("failed to write {shell} completions"))?;
        println!("{}", path.display());
    }
    Ok(())
}
