pub mod config;
pub mod enumeration;
pub mod errors;
pub mod observer;
pub mod orchestrator;
pub mod report;
pub mod run_history;
pub mod run_log;
pub mod selector;
pub mod transfer;

use std::time::Duration;

/// Tuning knobs for the simulated transfer loop.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Exclusive upper bound on the random byte increment applied per step.
    pub rate_bound: u64,
    /// Pause between steps, standing in for transfer latency.
    pub step_delay: Duration,
    /// Multiplier applied to the byte counter when deriving the displayed
    /// percentage. Values above 1.0 reach 100% before the counter reaches
    /// the file size.
    pub progress_skew: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rate_bound: 110_776,
            step_delay: Duration::from_millis(5),
            progress_skew: 1.5,
        }
    }
}
