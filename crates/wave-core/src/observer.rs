use crate::enumeration::SourceFile;
use crate::errors::TaskError;
use crate::report::CompletionRecord;

/// Receives run events in the order they happen.
///
/// Callbacks fire on the orchestrator's consumer side of the progress
/// channel, so percentages arrive in the order the transfer task produced
/// them.
pub trait TransferObserver: Send + Sync {
    fn transfer_started(&self, file: &SourceFile, position: usize, total: usize) {
        let _ = (file, position, total);
    }

    fn progress(&self, percent: u8) {
        let _ = percent;
    }

    fn transfer_completed(&self, record: &CompletionRecord, completed: usize, total: usize) {
        let _ = (record, completed, total);
    }

    fn transfer_failed(&self, file: &SourceFile, error: &TaskError) {
        let _ = (file, error);
    }
}

/// Observer that ignores every event.
pub struct NoopObserver;

impl TransferObserver for NoopObserver {}
