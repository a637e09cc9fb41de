use std::sync::atomic::Ordering::Relaxed;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use eyre::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use wave_core::enumeration::SourceFile;
use wave_core::errors::TaskError;
use wave_core::observer::TransferObserver;
use wave_core::orchestrator::{RunOptions, RunSummary, SimulationOrchestrator};
use wave_core::report::CompletionRecord;
use wave_core::SimConfig;

use crate::cli::RunArgs;
use crate::context::AppContext;
use crate::format_bytes;

struct CliObserver {
    bar: Option<ProgressBar>,
}

impl CliObserver {
    fn new(show_bar: bool) -> Self {
        let bar = show_bar.then(|| {
            let pb = ProgressBar::new(100);
            pb.set_style(
                ProgressStyle::with_template("[{bar:40}] {percent:>3}% {msg}")
                    .unwrap()
                    .progress_chars("=> "),
            );
            pb
        });
        Self { bar }
    }

    fn println(&self, line: String) {
        match &self.bar {
            Some(bar) => bar.println(line),
            None => println!("{line}"),
        }
    }
}

impl TransferObserver for CliObserver {
    fn transfer_started(&self, file: &SourceFile, _position: usize, _total: usize) {
        if let Some(bar) = &self.bar {
            bar.set_position(0);
            bar.set_message(format!("Downloading {}", file.name));
        }
    }

    fn progress(&self, percent: u8) {
        if let Some(bar) = &self.bar {
            bar.set_position(u64::from(percent));
        }
    }

    fn transfer_completed(&self, record: &CompletionRecord, completed: usize, total: usize) {
        self.println(format!("{} {}/{}", record.file_name, completed, total));
    }

    fn transfer_failed(&self, file: &SourceFile, error: &TaskError) {
        self.println(format!("Download of {} failed: {error}", file.name));
    }
}

pub async fn run_simulation(ctx: &AppContext, args: &RunArgs) -> Result<()> {
    let source = args.source.clone();
    if !source.exists() {
        bail!("source directory does not exist: {}", source.display());
    }

    let run_id = args
        .run_id
        .clone()
        .unwrap_or_else(|| Utc::now().format("%Y%m%d-%H%M%S").to_string());

    let mut options = RunOptions::new(args.log_dir.clone(), run_id);
    options.sim = SimConfig {
        rate_bound: args.rate_bound.max(1),
        step_delay: Duration::from_millis(args.delay_ms),
        ..SimConfig::default()
    };
    options.seed = args.seed;
    options.verbose = args.verbose;
    options.run_history = ctx.run_history_enabled && !args.no_history;

    let cancel = Arc::clone(&options.cancel);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.store(true, Relaxed);
        }
    });

    let observer = CliObserver::new(args.progress);
    let run_source = source.clone();

    let summary = tokio::task::spawn_blocking(move || {
        let orchestrator = SimulationOrchestrator::new();
        let result = orchestrator
            .execute_run(&run_source, options, &observer)
            .with_context(|| {
                format!("failed to simulate download of {}", run_source.display())
            });
        if let Some(bar) = observer.bar {
            bar.finish_and_clear();
        }
        result
    })
    .await??;

    print_summary(&summary);

    if summary.interrupted {
        bail!("run interrupted before all files completed");
    }

    Ok(())
}

fn print_summary(summary: &RunSummary) {
    let throughput = if summary.duration.as_secs_f64() > 0.0 {
        summary.total_bytes as f64 / summary.duration.as_secs_f64()
    } else {
        0.0
    };

    println!(
        "Run{} complete: {} of {} file(s), {} in {:.2?}",
        if summary.interrupted {
            " (interrupted)"
        } else {
            ""
        },
        summary.files_completed,
        summary.files_listed,
        format_bytes(summary.total_bytes),
        summary.duration
    );
    println!(
        "• Simulated throughput: {}/s | Steps: {}",
        format_bytes(throughput as u64),
        summary.steps
    );
    if let Some(path) = &summary.log_path {
        println!("• Log: {}", path.display());
    }
    if summary.log_write_errors > 0 {
        println!("• Log write errors: {}", summary.log_write_errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime")
    }

    fn args(source: std::path::PathBuf, log_dir: std::path::PathBuf) -> RunArgs {
        RunArgs {
            source,
            log_dir,
            run_id: Some("cli-test".to_string()),
            seed: Some(1),
            delay_ms: 0,
            rate_bound: 110_776,
            progress: false,
            verbose: false,
            no_history: true,
        }
    }

    #[test]
    fn run_simulates_a_directory_and_writes_the_log() -> Result<()> {
        let tmp = tempdir()?;
        let src = tmp.path().join("src");
        std::fs::create_dir_all(&src)?;
        std::fs::write(src.join("hello.txt"), b"hello world")?;
        let log_dir = tmp.path().join("logs");

        let ctx = AppContext {
            run_history_enabled: false,
        };
        runtime().block_on(run_simulation(&ctx, &args(src, log_dir.clone())))?;

        let contents = std::fs::read_to_string(log_dir.join("wave-cli-test.log"))?;
        assert!(contents.contains("FILE_NAME: hello.txt"));
        assert!(contents.contains("AVG_DOWNLOAD_SPEED: "));
        Ok(())
    }

    #[test]
    fn run_fails_for_a_missing_source() {
        let tmp = tempdir().expect("tempdir");
        let ctx = AppContext {
            run_history_enabled: false,
        };
        let missing = args(tmp.path().join("gone"), tmp.path().to_path_buf());
        assert!(runtime().block_on(run_simulation(&ctx, &missing)).is_err());
    }
}
