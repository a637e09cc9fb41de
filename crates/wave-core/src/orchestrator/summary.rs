use std::path::PathBuf;
use std::time::Duration;

/// Summary of a simulation run.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    /// Size of the most recent directory listing.
    pub files_listed: usize,
    pub files_completed: usize,
    pub total_bytes: u64,
    /// Simulation steps across every completed transfer.
    pub steps: u64,
    pub duration: Duration,
    /// The run stopped before the candidate list was exhausted.
    pub interrupted: bool,
    pub log_write_errors: u32,
    /// Where completion blocks were written, once the first append landed.
    pub log_path: Option<PathBuf>,
}
