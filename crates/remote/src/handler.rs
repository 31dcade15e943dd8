use std::path::Path;

use crate::{RemoteEntry, RemotePath, Site};

/// Consumer callbacks of a
/// [`RemoteRecursiveOperation`](crate::RemoteRecursiveOperation).
///
/// Every method defaults to doing nothing. `()` is the no-op handler.
#[allow(unused_variables)]
pub trait RemoteOperationHandler {
    /// A file to transfer, in transfer modes. `local_dir` is the visit's
    /// local target directory.
    fn transfer_file(&mut self, entry: &RemoteEntry, remote_dir: &RemotePath, local_dir: Option<&Path>) {
    }

    /// A directory listed without entries, in
    /// [`Transfer`](recursion::OperationMode::Transfer) mode.
    fn empty_directory(&mut self, remote_dir: &RemotePath, local_dir: Option<&Path>) {}

    /// A link queued as a directory turned out not to be one.
    ///
    /// `local_dir` is where the entry would land locally.
    fn invalid_directory_link(
        &mut self,
        site: &Site,
        local_dir: Option<&Path>,
        remote_dir: &RemotePath,
        name: &str,
    ) {
    }

    /// A listing has been fully processed.
    fn listing_ended(&mut self) {}

    /// Every root has been processed.
    fn operation_finished(&mut self) {}

    /// A listing reported cancellation and the operation was stopped.
    fn operation_canceled(&mut self) {}
}

impl RemoteOperationHandler for () {}
