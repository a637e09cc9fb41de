//! The simulated transfer task.
//!
//! A transfer is a discrete state machine: each step adds a random byte
//! increment below `SimConfig::rate_bound` to a synthetic counter and
//! reports the resulting percentage. [`drive_transfer`] runs the machine on
//! the runtime, delivering every percentage in order over an mpsc channel
//! and pausing `step_delay` between steps.

use std::sync::atomic::{AtomicBool, Ordering::Relaxed};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use tokio::sync::mpsc;

use crate::errors::TaskError;
use crate::SimConfig;

/// Progress state for one file.
#[derive(Debug, Clone)]
pub struct TransferTask {
    file_size: u64,
    bytes_read: u64,
    rate_bound: u64,
    progress_skew: f64,
}

/// What a finished transfer looked like.
#[derive(Debug, Clone, Copy)]
pub struct TransferOutcome {
    pub steps: u64,
    pub bytes_read: u64,
    pub elapsed: Duration,
}

impl TransferTask {
    pub fn new(file_size: u64, config: &SimConfig) -> Self {
        Self {
            file_size,
            bytes_read: 0,
            rate_bound: config.rate_bound.max(1),
            progress_skew: config.progress_skew,
        }
    }

    /// Advance the counter by one random increment and return the resulting
    /// percentage.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u8 {
        let increment = rng.random_range(0..self.rate_bound);
        self.advance(increment)
    }

    /// Advance by an explicit increment. The random path goes through
    /// [`TransferTask::step`]; deterministic callers drive this directly.
    pub fn advance(&mut self, increment: u64) -> u8 {
        self.bytes_read = self.bytes_read.saturating_add(increment);
        self.progress()
    }

    /// Displayed percentage for the current counter, in `[0, 100]`.
    ///
    /// The skew multiplier makes this hit 100 while the counter is still
    /// short of the file size; the counter, not the percentage, decides
    /// completion.
    pub fn progress(&self) -> u8 {
        if self.file_size == 0 {
            return 100;
        }
        let percent =
            (self.bytes_read as f64 * self.progress_skew / self.file_size as f64 * 100.0).floor();
        percent.clamp(0.0, 100.0) as u8
    }

    /// The synthetic counter has reached the real file size.
    pub fn is_complete(&self) -> bool {
        self.file_size == 0 || self.bytes_read >= self.file_size
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}

/// Run `task` to completion, delivering each percentage through
/// `progress_tx` in the order produced. Duplicate percentages are legal
/// when consecutive steps round to the same value.
///
/// The cancellation flag is observed at every suspension point; a cancelled
/// task aborts with an interruption error and nothing is retried or rolled
/// back. Completion is signalled exactly once, by returning.
pub async fn drive_transfer<R>(
    mut task: TransferTask,
    mut rng: R,
    step_delay: Duration,
    progress_tx: mpsc::Sender<u8>,
    cancel: Arc<AtomicBool>,
    file_name: String,
) -> Result<TransferOutcome, TaskError>
where
    R: Rng + Send,
{
    let started = Instant::now();
    let mut steps = 0u64;

    loop {
        if cancel.load(Relaxed) {
            log::warn!("transfer of {file_name} interrupted after {steps} step(s)");
            return Err(TaskError::interrupted(
                "cancelled between steps",
                Some(file_name),
            ));
        }

        let percent = task.step(&mut rng);
        steps += 1;

        if progress_tx.send(percent).await.is_err() {
            log::warn!("transfer of {file_name} lost its progress consumer");
            return Err(TaskError::interrupted(
                "progress receiver dropped",
                Some(file_name),
            ));
        }

        if task.is_complete() {
            break;
        }

        tokio::time::sleep(step_delay).await;
    }

    Ok(TransferOutcome {
        steps,
        bytes_read: task.bytes_read(),
        elapsed: started.elapsed(),
    })
}
