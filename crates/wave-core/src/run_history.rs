//! Local run history for the `history` subcommand.
//!
//! Summarized run records land in a capped JSONL file under the user's data
//! directory. The data stays on-device and can be disabled via
//! `WAVE_DISABLE_RUN_HISTORY=1`.

use std::collections::VecDeque;
use std::env;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::orchestrator::RunSummary;

const DEFAULT_MAX_BYTES: u64 = 262_144;
const DISABLE_ENV: &str = "WAVE_DISABLE_RUN_HISTORY";

/// Summary of one run, captured after it finishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub timestamp_epoch_ms: u128,
    pub source_root: String,
    pub run_id: String,
    pub files_completed: usize,
    pub files_listed: usize,
    pub total_bytes: u64,
    pub duration_ms: u128,
    pub interrupted: bool,
    pub log_write_errors: u32,
}

impl RunRecord {
    pub fn from_summary(source_root: &Path, run_id: &str, summary: &RunSummary) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self {
            timestamp_epoch_ms: now.as_millis(),
            source_root: source_root.display().to_string(),
            run_id: run_id.to_string(),
            files_completed: summary.files_completed,
            files_listed: summary.files_listed,
            total_bytes: summary.total_bytes,
            duration_ms: summary.duration.as_millis(),
            interrupted: summary.interrupted,
            log_write_errors: summary.log_write_errors,
        }
    }
}

/// Whether history capture is enabled for this process.
pub fn history_enabled() -> bool {
    !env::var(DISABLE_ENV)
        .map(|val| val == "1" || val.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Append a record to the local run history store.
///
/// Errors are bubbled up so callers can decide whether to log or ignore
/// them.
pub fn append_run_record(record: &RunRecord) -> Result<()> {
    if !history_enabled() {
        return Ok(());
    }

    let path = history_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create run history directory {}", parent.display()))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open run history file {}", path.display()))?;

    let line = serde_json::to_string(record).context("serialize run record")?;
    writeln!(file, "{line}").context("write run record")?;
    drop(file);

    enforce_size_cap(&path, DEFAULT_MAX_BYTES)?;
    Ok(())
}

/// Read the most recent records, oldest first. `limit` of 0 means all.
pub fn read_recent_records(limit: usize) -> Result<Vec<RunRecord>> {
    let path = history_path()?;
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(&path)?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();

    for line in reader.lines() {
        let Ok(line) = line else { continue };
        if line.trim().is_empty() {
            continue;
        }
        if let Ok(record) = serde_json::from_str::<RunRecord>(&line) {
            records.push(record);
        }
    }

    if limit == 0 || records.len() <= limit {
        return Ok(records);
    }

    let start = records.len().saturating_sub(limit);
    Ok(records[start..].to_vec())
}

/// Remove the stored run history. Returns whether a file existed.
pub fn clear_history() -> Result<bool> {
    let path = history_path()?;
    match fs::remove_file(&path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(err) => {
            Err(err).with_context(|| format!("remove run history file {}", path.display()))
        }
    }
}

fn history_path() -> Result<PathBuf> {
    Ok(config::data_dir()?.join("runs.jsonl"))
}

/// Best-effort rotation that keeps the newest records when the store grows
/// past the cap.
fn enforce_size_cap(path: &Path, max_bytes: u64) -> Result<()> {
    let metadata = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err.into()),
    };

    if metadata.len() <= max_bytes {
        return Ok(());
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines: VecDeque<String> = reader
        .lines()
        .collect::<std::result::Result<Vec<String>, _>>()
        .context("read run history for rotation")?
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect();

    let mut total_size: usize = lines.iter().map(|l| l.len() + 1).sum();
    while lines.len() > 1 && total_size > max_bytes as usize {
        if let Some(front) = lines.pop_front() {
            total_size -= front.len() + 1;
        }
    }

    let mut file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .context("truncate run history during rotation")?;
    for line in lines {
        writeln!(file, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn summary(completed: usize) -> RunSummary {
        RunSummary {
            files_listed: completed,
            files_completed: completed,
            total_bytes: completed as u64 * 1_024,
            steps: completed as u64,
            duration: Duration::from_millis(5),
            ..RunSummary::default()
        }
    }

    // The data-dir override is process-global, so everything touching it
    // lives in this one test.
    #[test]
    fn append_read_clear_roundtrip() -> Result<()> {
        let temp = tempfile::tempdir()?;
        config::set_data_dir(temp.path());

        assert!(read_recent_records(0)?.is_empty());
        assert!(!clear_history()?);

        for i in 1..=3 {
            let record =
                RunRecord::from_summary(Path::new("/tmp/src"), &format!("run-{i}"), &summary(i));
            append_run_record(&record)?;
        }

        let all = read_recent_records(0)?;
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].run_id, "run-1");
        assert_eq!(all[2].files_completed, 3);

        let last_two = read_recent_records(2)?;
        assert_eq!(last_two.len(), 2);
        assert_eq!(last_two[0].run_id, "run-2");

        assert!(clear_history()?);
        assert!(read_recent_records(0)?.is_empty());

        config::clear_data_dir_override();
        Ok(())
    }
}
