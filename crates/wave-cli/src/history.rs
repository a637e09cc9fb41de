use std::time::{Duration, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use eyre::Result;
use wave_core::run_history;

use crate::cli::HistoryArgs;
use crate::format_bytes;

pub fn run_history_report(args: &HistoryArgs) -> Result<()> {
    if args.clear {
        match run_history::clear_history()? {
            true => println!("Cleared run history."),
            false => println!("No run history to clear."),
        }
        return Ok(());
    }

    let records = run_history::read_recent_records(args.limit)?;
    println!(
        "Run history (showing up to {} entries): {}",
        args.limit,
        records.len()
    );
    if !run_history::history_enabled() {
        println!("Status: capture disabled via WAVE_DISABLE_RUN_HISTORY");
    }

    if records.is_empty() {
        return Ok(());
    }

    let total_runs = records.len() as f64;
    let avg_duration = records.iter().map(|r| r.duration_ms as f64).sum::<f64>() / total_runs;
    let interrupted_runs = records.iter().filter(|r| r.interrupted).count();
    println!(
        "Interrupted runs: {} | Average duration: {:.1} ms",
        interrupted_runs, avg_duration
    );

    if let Some(last) = records.last() {
        let millis = last.timestamp_epoch_ms.min(u64::MAX as u128) as u64;
        let timestamp = DateTime::<Utc>::from(UNIX_EPOCH + Duration::from_millis(millis));

        println!("Most recent run:");
        println!(
            "  Timestamp : {}",
            timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        );
        println!("  Source    : {}", last.source_root);
        println!("  Run id    : {}", last.run_id);
        println!(
            "  Completed : {} of {} file(s), {}",
            last.files_completed,
            last.files_listed,
            format_bytes(last.total_bytes)
        );
        println!(
            "  Duration  : {} ms | Interrupted: {}",
            last.duration_ms, last.interrupted
        );
        if last.log_write_errors > 0 {
            println!("  Log write errors: {}", last.log_write_errors);
        }
    }

    Ok(())
}
