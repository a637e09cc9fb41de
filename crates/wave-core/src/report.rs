use std::time::Duration;

use chrono::{DateTime, Utc};

/// Smallest elapsed time used when deriving rates, so instant completions
/// never divide by zero.
const MIN_RATE_ELAPSED: Duration = Duration::from_millis(1);

/// One completed simulated download, as recorded in the run log.
#[derive(Debug, Clone)]
pub struct CompletionRecord {
    pub file_name: String,
    pub size_bytes: u64,
    pub elapsed: Duration,
    pub completed_at: DateTime<Utc>,
}

impl CompletionRecord {
    pub fn new(file_name: impl Into<String>, size_bytes: u64, elapsed: Duration) -> Self {
        Self {
            file_name: file_name.into(),
            size_bytes,
            elapsed,
            completed_at: Utc::now(),
        }
    }

    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }

    pub fn size_mb(&self) -> f64 {
        self.size_kb() / 1024.0
    }

    /// Average rate in bytes per second. Elapsed times below one
    /// millisecond are clamped so the derivation stays finite.
    pub fn throughput_bytes_per_sec(&self) -> f64 {
        let elapsed = self.elapsed.max(MIN_RATE_ELAPSED);
        self.size_bytes as f64 / elapsed.as_secs_f64()
    }

    pub fn throughput_kb_per_sec(&self) -> f64 {
        self.throughput_bytes_per_sec() / 1024.0
    }

    pub fn throughput_mb_per_sec(&self) -> f64 {
        self.throughput_kb_per_sec() / 1024.0
    }

    pub fn elapsed_whole_secs(&self) -> u64 {
        self.elapsed.as_secs()
    }

    pub fn elapsed_millis(&self) -> u128 {
        self.elapsed.as_millis()
    }
}
