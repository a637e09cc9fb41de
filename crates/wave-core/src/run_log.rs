//! Append-only run log writer.
//!
//! One block per completed file, in the fixed field order consumers of the
//! log expect. The file is created on first append and opened, appended,
//! and closed per record, so a run that completes nothing leaves no log
//! behind.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};

use crate::report::CompletionRecord;

/// Writes completion blocks for a single run.
///
/// `run_id` distinguishes this run's log from other runs in the same
/// directory; callers inject it rather than deriving it from ambient
/// randomness.
#[derive(Debug, Clone)]
pub struct TransferLogWriter {
    path: PathBuf,
}

impl TransferLogWriter {
    pub fn new(log_dir: &Path, run_id: &str) -> Self {
        Self {
            path: log_dir.join(format!("wave-{run_id}.log")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one completion block.
    pub fn append(&self, record: &CompletionRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create log directory {}", parent.display()))?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open run log {}", self.path.display()))?;

        writeln!(file, "FILE_NAME: {}", record.file_name)?;
        writeln!(
            file,
            "FILE_SIZE: {:.2} MB | {:.2} KB | {} bytes",
            record.size_mb(),
            record.size_kb(),
            record.size_bytes
        )?;
        writeln!(
            file,
            "AVG_DOWNLOAD_SPEED: {:.2} MB/s | {:.2} KB/s | {:.2} bytes/s",
            record.throughput_mb_per_sec(),
            record.throughput_kb_per_sec(),
            record.throughput_bytes_per_sec()
        )?;
        writeln!(
            file,
            "SPENT: {} seconds | {} milliseconds",
            record.elapsed_whole_secs(),
            record.elapsed_millis()
        )?;
        writeln!(file)?;

        Ok(())
    }
}
