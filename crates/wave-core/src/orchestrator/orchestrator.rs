use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering::Relaxed;
use std::sync::Arc;
use std::time::Instant;

use eyre::{eyre, Context, Result};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tokio::runtime::Builder;
use tokio::sync::mpsc;

use crate::enumeration::enumerate_source_files;
use crate::errors::TaskError;
use crate::observer::TransferObserver;
use crate::report::CompletionRecord;
use crate::run_history::{self, RunRecord};
use crate::run_log::TransferLogWriter;
use crate::selector;
use crate::transfer::{drive_transfer, TransferTask};

use super::options::RunOptions;
use super::summary::RunSummary;

/// Depth of the per-transfer progress hand-off. The producer parks here
/// when the consumer lags; ordering is preserved either way.
const PROGRESS_CHANNEL_CAPACITY: usize = 64;

pub struct SimulationOrchestrator;

impl SimulationOrchestrator {
    pub fn new() -> Self {
        Self
    }

    /// Run the whole simulation over `source_root`: enumerate, pick an
    /// unprocessed file at random, drive its simulated transfer, record the
    /// completion, and repeat until no unprocessed files remain or the run
    /// is cancelled.
    ///
    /// Exactly one transfer is in flight at a time. This loop is the sole
    /// owner of the processed set, the counters, and the log writer; the
    /// transfer task reaches it only through the progress channel.
    pub fn execute_run(
        &self,
        source_root: &Path,
        options: RunOptions,
        observer: &dyn TransferObserver,
    ) -> Result<RunSummary> {
        if !source_root.exists() {
            return Err(eyre!(
                "source directory does not exist: {}",
                source_root.display()
            ));
        }

        let start_time = Instant::now();

        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let writer = TransferLogWriter::new(&options.log_dir, &options.run_id);
        let mut processed: HashSet<PathBuf> = HashSet::new();
        let mut summary = RunSummary::default();

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("build tokio runtime")?;

        loop {
            if options.cancel.load(Relaxed) {
                log::warn!("run cancelled before selecting the next file");
                summary.interrupted = true;
                break;
            }

            // Fresh listing before every pick; the processed set keeps
            // finished files out of the pool.
            let files = match enumerate_source_files(source_root) {
                Ok(files) => files,
                Err(err) => {
                    return Err(TaskError::enumeration(format!("{err:#}")).into());
                }
            };
            summary.files_listed = files.len();

            let candidates: Vec<_> = files
                .iter()
                .filter(|file| !processed.contains(&file.path))
                .cloned()
                .collect();

            let Some(file) = selector::pick(&candidates, &mut rng).cloned() else {
                break;
            };

            observer.transfer_started(&file, summary.files_completed + 1, files.len());
            if options.verbose {
                eprintln!("Downloading {} ({} bytes)", file.name, file.size);
            }

            let task = TransferTask::new(file.size, &options.sim);
            let task_rng = StdRng::seed_from_u64(rng.next_u64());
            let (progress_tx, mut progress_rx) = mpsc::channel(PROGRESS_CHANNEL_CAPACITY);

            let joined = runtime.block_on(async {
                let producer = tokio::spawn(drive_transfer(
                    task,
                    task_rng,
                    options.sim.step_delay,
                    progress_tx,
                    Arc::clone(&options.cancel),
                    file.name.clone(),
                ));

                while let Some(percent) = progress_rx.recv().await {
                    observer.progress(percent);
                }

                producer.await
            });

            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(join_err) => return Err(eyre!("transfer task panicked: {join_err}")),
            };

            match outcome {
                Ok(outcome) => {
                    processed.insert(file.path.clone());
                    summary.files_completed += 1;
                    summary.total_bytes += file.size;
                    summary.steps += outcome.steps;

                    let record =
                        CompletionRecord::new(file.name.clone(), file.size, outcome.elapsed);
                    match writer.append(&record) {
                        Ok(()) => {
                            if summary.log_path.is_none() {
                                summary.log_path = Some(writer.path().to_path_buf());
                            }
                        }
                        Err(err) => {
                            let log_err =
                                TaskError::log_write(format!("{err:#}"), Some(file.name.clone()));
                            log::warn!("run log append failed: {log_err}");
                            summary.log_write_errors += 1;
                        }
                    }
                    observer.transfer_completed(&record, summary.files_completed, files.len());
                }
                Err(task_err) => {
                    observer.transfer_failed(&file, &task_err);
                    if task_err.ends_run() {
                        summary.interrupted = true;
                        break;
                    }
                    // Skip without recording so the file is not re-picked.
                    processed.insert(file.path.clone());
                }
            }
        }

        summary.duration = start_time.elapsed();

        if options.run_history && run_history::history_enabled() {
            let record = RunRecord::from_summary(source_root, &options.run_id, &summary);
            if let Err(err) = run_history::append_run_record(&record) {
                log::warn!("failed to record run history: {err:#}");
            }
        }

        Ok(summary)
    }
}

impl Default for SimulationOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}
