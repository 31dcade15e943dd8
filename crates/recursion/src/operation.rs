use crate::{OperationCounters, OperationMode};

/// Capability shared by the local and remote engines.
pub trait RecursiveOperation {
    /// Mode of the running operation, [`OperationMode::None`] when idle.
    fn operation_mode(&self) -> OperationMode;

    /// Snapshot of the progress counters.
    fn counters(&self) -> OperationCounters;

    /// Number of roots still queued.
    fn root_count(&self) -> usize;

    /// Cancels the operation and resets the engine to idle.
    fn stop(&mut self);

    /// Returns `true` while an operation is running.
    fn is_active(&self) -> bool {
        self.operation_mode() != OperationMode::None
    }

    /// Files processed so far.
    fn processed_files(&self) -> u64 {
        self.counters().files
    }

    /// Directories enumerated so far.
    fn processed_directories(&self) -> u64 {
        self.counters().directories
    }
}
