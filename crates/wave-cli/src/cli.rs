use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wave")]
#[command(about = "Simulates downloading the files of a local directory")]
#[command(after_help = "Run '<command> --help' for detailed options on each command.")]
pub struct Cli {
    /// Override the data directory (run history) for this invocation
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simulate downloading every file in a directory
    Run(RunArgs),
    /// List the candidate files a run would process
    List(ListArgs),
    /// Show recent run records captured locally
    History(HistoryArgs),
}

#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    /// Source directory supplying the candidate files
    pub source: PathBuf,
    /// Directory receiving the run log
    #[arg(long, default_value = ".")]
    pub log_dir: PathBuf,
    /// Identifier embedded in the run log file name (default: UTC timestamp)
    #[arg(long)]
    pub run_id: Option<String>,
    /// Seed for the random source (reproducible runs)
    #[arg(long)]
    pub seed: Option<u64>,
    /// Milliseconds to pause between simulation steps
    #[arg(long, default_value_t = 5)]
    pub delay_ms: u64,
    /// Exclusive upper bound on the per-step byte increment
    #[arg(long, default_value_t = 110_776)]
    pub rate_bound: u64,
    /// Show an interactive progress indicator
    #[arg(long, short = 'p')]
    pub progress: bool,
    /// Keep verbose logs from the orchestrator
    #[arg(long, short = 'v')]
    pub verbose: bool,
    /// Skip writing a run history record for this run
    #[arg(long)]
    pub no_history: bool,
}

#[derive(Args, Clone, Debug)]
pub struct ListArgs {
    /// Directory to list
    pub source: PathBuf,
}

#[derive(Args, Clone, Debug)]
pub struct HistoryArgs {
    /// Number of recent records to display (0 = all)
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
    /// Remove the stored run history file
    #[arg(long)]
    pub clear: bool,
}
