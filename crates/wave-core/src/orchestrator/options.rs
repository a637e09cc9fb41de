use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::SimConfig;

/// Options for executing a simulation run.
///
/// Cloning shares the cancellation flag, so a clone handed to another
/// thread can stop the run.
#[derive(Clone, Debug)]
pub struct RunOptions {
    pub sim: SimConfig,
    /// Directory receiving this run's log file.
    pub log_dir: PathBuf,
    /// Identifier embedded in the log file name; injected by the caller,
    /// never derived from ambient randomness.
    pub run_id: String,
    /// Seed for the random source. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub run_history: bool,
    pub verbose: bool,
    pub cancel: Arc<AtomicBool>,
}

impl RunOptions {
    pub fn new(log_dir: impl Into<PathBuf>, run_id: impl Into<String>) -> Self {
        Self {
            sim: SimConfig::default(),
            log_dir: log_dir.into(),
            run_id: run_id.into(),
            seed: None,
            run_history: true,
            verbose: false,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }
}
