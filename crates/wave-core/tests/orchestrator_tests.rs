use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering::Relaxed};
use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use wave_core::observer::{NoopObserver, TransferObserver};
use wave_core::orchestrator::{RunOptions, SimulationOrchestrator};
use wave_core::SimConfig;

fn fast_options(log_dir: &Path, run_id: &str) -> RunOptions {
    let mut options = RunOptions::new(log_dir, run_id);
    options.sim = SimConfig {
        step_delay: Duration::ZERO,
        ..SimConfig::default()
    };
    options.seed = Some(42);
    options.run_history = false;
    options
}

#[test]
fn run_completes_every_file_exactly_once() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let src = temp.path().join("src");
    std::fs::create_dir_all(&src)?;
    std::fs::write(src.join("empty.bin"), b"")?;
    std::fs::write(src.join("small.bin"), vec![0u8; 1_024])?;
    std::fs::write(src.join("large.bin"), vec![0u8; 1_048_576])?;

    let log_dir = temp.path().join("logs");
    let options = fast_options(&log_dir, "test");
    let summary = SimulationOrchestrator::new().execute_run(&src, options, &NoopObserver)?;

    assert_eq!(summary.files_completed, 3);
    assert_eq!(summary.files_listed, 3);
    assert_eq!(summary.total_bytes, 1_049_600);
    assert!(!summary.interrupted);
    assert_eq!(summary.log_write_errors, 0);
    assert!(summary.steps >= 3);

    let log_path = summary.log_path.expect("log path recorded");
    assert_eq!(log_path, log_dir.join("wave-test.log"));

    let contents = std::fs::read_to_string(log_path)?;
    assert_eq!(contents.matches("FILE_NAME: ").count(), 3);
    for name in ["empty.bin", "small.bin", "large.bin"] {
        assert_eq!(
            contents.matches(&format!("FILE_NAME: {name}\n")).count(),
            1,
            "expected exactly one block for {name}"
        );
    }
    assert_eq!(contents.matches("AVG_DOWNLOAD_SPEED: ").count(), 3);
    assert_eq!(contents.matches("SPENT: ").count(), 3);
    assert!(contents.ends_with("\n\n"));

    Ok(())
}

#[test]
fn empty_directory_is_a_clean_zero_work_run() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let src = temp.path().join("src");
    std::fs::create_dir_all(&src)?;
    let log_dir = temp.path().join("logs");

    let options = fast_options(&log_dir, "empty");
    let summary = SimulationOrchestrator::new().execute_run(&src, options, &NoopObserver)?;

    assert_eq!(summary.files_completed, 0);
    assert_eq!(summary.files_listed, 0);
    assert!(!summary.interrupted);
    assert!(summary.log_path.is_none());
    assert!(!log_dir.join("wave-empty.log").exists());

    Ok(())
}

#[test]
fn missing_directory_is_an_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let options = fast_options(temp.path(), "missing");
    let result = SimulationOrchestrator::new().execute_run(
        &temp.path().join("gone"),
        options,
        &NoopObserver,
    );
    assert!(result.is_err());
}

struct CancelOnFirstProgress {
    cancel: Arc<AtomicBool>,
}

impl TransferObserver for CancelOnFirstProgress {
    fn progress(&self, _percent: u8) {
        self.cancel.store(true, Relaxed);
    }
}

#[test]
fn interruption_leaves_no_record_behind() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let src = temp.path().join("src");
    std::fs::create_dir_all(&src)?;
    // Large enough that the transfer cannot finish inside the progress
    // channel's buffer once cancellation lands.
    std::fs::write(src.join("large.bin"), vec![0u8; 10_485_760])?;

    let log_dir = temp.path().join("logs");
    let options = fast_options(&log_dir, "cancelled");
    let observer = CancelOnFirstProgress {
        cancel: Arc::clone(&options.cancel),
    };
    let summary = SimulationOrchestrator::new().execute_run(&src, options, &observer)?;

    assert!(summary.interrupted);
    assert_eq!(summary.files_completed, 0);
    assert!(summary.log_path.is_none());
    assert!(!log_dir.join("wave-cancelled.log").exists());

    Ok(())
}

#[test]
fn cancellation_before_the_run_selects_nothing() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let src = temp.path().join("src");
    std::fs::create_dir_all(&src)?;
    std::fs::write(src.join("file.bin"), vec![0u8; 1_024])?;

    let options = fast_options(temp.path(), "precancel");
    options.cancel.store(true, Relaxed);
    let summary = SimulationOrchestrator::new().execute_run(&src, options, &NoopObserver)?;

    assert!(summary.interrupted);
    assert_eq!(summary.files_completed, 0);
    Ok(())
}

#[test]
fn same_seed_is_reproducible() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let src = temp.path().join("src");
    std::fs::create_dir_all(&src)?;
    std::fs::write(src.join("a.bin"), vec![0u8; 200_000])?;
    std::fs::write(src.join("b.bin"), vec![0u8; 400_000])?;

    let first = SimulationOrchestrator::new().execute_run(
        &src,
        fast_options(&temp.path().join("logs1"), "first"),
        &NoopObserver,
    )?;
    let second = SimulationOrchestrator::new().execute_run(
        &src,
        fast_options(&temp.path().join("logs2"), "second"),
        &NoopObserver,
    )?;

    assert_eq!(first.steps, second.steps);
    assert_eq!(first.files_completed, second.files_completed);
    assert_eq!(first.total_bytes, second.total_bytes);
    Ok(())
}
