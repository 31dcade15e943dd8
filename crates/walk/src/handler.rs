use std::path::Path;

use crate::{ListingBatch, ListingEntry};

/// Wakes the consumer when delivered batches become available.
///
/// Called from the worker without the engine's lock held, and only when the
/// delivered queue goes from empty to non-empty. Implemented for closures.
pub trait BatchNotifier: Send + Sync {
    /// At least one batch is ready for [`next_batch`](crate::LocalRecursiveOperation::next_batch).
    fn batch_available(&self);
}

impl<F> BatchNotifier for F
where
    F: Fn() + Send + Sync,
{
    fn batch_available(&self) {
        self();
    }
}

/// Consumer callbacks dispatched by
/// [`LocalRecursiveOperation::drain`](crate::LocalRecursiveOperation::drain).
#[allow(unused_variables)]
pub trait LocalOperationHandler {
    /// Called for every delivered non-terminal batch, in any mode.
    fn listing(&mut self, batch: &ListingBatch) {}

    /// A file to transfer, in transfer modes.
    fn transfer_file(&mut self, source_dir: &Path, target_dir: Option<&Path>, entry: &ListingEntry) {
    }

    /// A directory without entries, in [`Transfer`](recursion::OperationMode::Transfer) mode.
    fn empty_directory(&mut self, source_dir: &Path, target_dir: Option<&Path>) {}

    /// A batch has been fully dispatched.
    fn listing_ended(&mut self) {}

    /// The traversal completed.
    fn operation_finished(&mut self) {}
}
