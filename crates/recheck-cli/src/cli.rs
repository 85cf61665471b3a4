use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "recheck",
    about = "Directory snapshot comparison for verifying manuscript reproducibility",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Capture a directory snapshot
    Snapshot(SnapshotArgs),
    /// Compare two directories by content digest
    Compare(CompareArgs),
    /// Check a directory against a saved manifest
    Check(CheckArgs),
    /// Manage the review session file
    Session(SessionArgs),
}

#[derive(Args)]
pub struct SnapshotArgs {
    /// Directory to capture
    pub dir: PathBuf,
    /// Walk into subdirectories
    #[arg(long)]
    pub recursive: bool,
    /// Write a JSON manifest to this path instead of printing
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompareArgs {
    /// Directory holding the submitted run
    pub before: PathBuf,
    /// Directory holding the re-executed run
    pub after: PathBuf,
    /// Walk into subdirectories
    #[arg(long)]
    pub recursive: bool,
    /// Print capture progress events while digesting
    #[arg(long)]
    pub progress: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Directory to check
    pub dir: PathBuf,
    /// Saved manifest to check against
    #[arg(short, long)]
    pub manifest: PathBuf,
    /// Walk into subdirectories
    #[arg(long)]
    pub recursive: bool,
}

#[derive(Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub action: SessionAction,
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// Write a fresh session file with the default review profiles
    Init {
        #[arg(long)]
        api_url: Option<String>,
        #[arg(long, default_value = "recheck-session.toml")]
        path: PathBuf,
    },
    /// Print a session file with tokens redacted
    Show {
        #[arg(long, default_value = "recheck-session.toml")]
        path: PathBuf,
    },
}
