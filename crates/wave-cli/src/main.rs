mod cli;
mod context;
mod history;
mod list;
mod run;

use clap::Parser;
use eyre::Result;

use crate::cli::{Cli, Commands};
use crate::context::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    let cli = Cli::parse();
    if let Some(dir) = &cli.data_dir {
        wave_core::config::set_data_dir(dir);
    }
    let ctx = AppContext::load();

    match &cli.command {
        Commands::Run(args) => run::run_simulation(&ctx, args).await?,
        Commands::List(args) => list::run_list(&args.source)?,
        Commands::History(args) => history::run_history_report(args)?,
    }

    Ok(())
}

pub(crate) fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_owned();
    }
    let mut value = bytes as f64;
    let mut unit = 0usize;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[unit])
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}
