//! Error taxonomy for simulation runs.
//!
//! Errors are categorized so the orchestrator applies one policy per kind:
//! - Interrupted: the transfer was cancelled mid-flight; the run stops with
//!   a non-success outcome and nothing is recorded for the file
//! - LogWrite: the run log could not be appended; counted and swallowed
//! - Enumeration: the source directory could not be listed; fatal

/// Kind of failure observed during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskErrorKind {
    /// The transfer task was cancelled while suspended between steps.
    Interrupted,
    /// A completion block could not be appended to the run log.
    LogWrite,
    /// The candidate listing itself failed.
    Enumeration,
}

/// A run error with its kind.
#[derive(Debug)]
pub struct TaskError {
    /// The underlying error message.
    pub message: String,
    /// The file involved (if applicable).
    pub file: Option<String>,
    /// The error kind for policy decisions.
    pub kind: TaskErrorKind,
}

impl TaskError {
    /// Create a new interruption error.
    pub fn interrupted(message: impl Into<String>, file: Option<String>) -> Self {
        Self {
            message: message.into(),
            file,
            kind: TaskErrorKind::Interrupted,
        }
    }

    /// Create a new log-write error.
    pub fn log_write(message: impl Into<String>, file: Option<String>) -> Self {
        Self {
            message: message.into(),
            file,
            kind: TaskErrorKind::LogWrite,
        }
    }

    /// Create a new enumeration error.
    pub fn enumeration(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            file: None,
            kind: TaskErrorKind::Enumeration,
        }
    }

    /// Whether the run must stop when this error is observed.
    pub fn ends_run(&self) -> bool {
        matches!(
            self.kind,
            TaskErrorKind::Interrupted | TaskErrorKind::Enumeration
        )
    }
}

impl std::fmt::Display for TaskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}: {}", file, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for TaskError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupted_ends_the_run() {
        let err = TaskError::interrupted("cancelled between steps", Some("file.bin".to_string()));
        assert!(err.ends_run());
    }

    #[test]
    fn log_write_does_not_end_the_run() {
        let err = TaskError::log_write("disk full", Some("file.bin".to_string()));
        assert!(!err.ends_run());
    }

    #[test]
    fn enumeration_ends_the_run() {
        let err = TaskError::enumeration("source directory vanished");
        assert!(err.ends_run());
    }

    #[test]
    fn display_includes_the_file() {
        let err = TaskError::interrupted("cancelled between steps", Some("file.bin".to_string()));
        assert_eq!(err.to_string(), "file.bin: cancelled between steps");

        let bare = TaskError::enumeration("source directory vanished");
        assert_eq!(bare.to_string(), "source directory vanished");
    }
}
