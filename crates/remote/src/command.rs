use std::collections::VecDeque;

use logging::trace_cmd;

use crate::RemotePath;

/// Work item for the protocol layer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    /// List `name` inside `path` (or `path` itself for an empty name).
    /// `as_link` asks the server to resolve the entry as a link.
    List {
        /// Containing directory.
        path: RemotePath,
        /// Entry to list.
        name: String,
        /// Whether the entry is a link queued by the caller.
        as_link: bool,
    },
    /// Remove the directory `name` inside `path`.
    RemoveDirectory {
        /// Containing directory.
        path: RemotePath,
        /// Directory to remove.
        name: String,
    },
    /// Remove the files `names` inside `path`.
    RemoveFiles {
        /// Containing directory.
        path: RemotePath,
        /// Files to remove.
        names: Vec<String>,
    },
    /// Set the permissions of `name` inside `path`.
    Chmod {
        /// Containing directory.
        path: RemotePath,
        /// Entry to change.
        name: String,
        /// New permissions as understood by the server, e.g. `755`.
        permissions: String,
    },
}

impl Command {
    /// Returns `true` for [`Command::List`].
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List { .. })
    }
}

/// Receives commands in submission order.
///
/// Remove and chmod commands are fire-and-forget. After a list command the
/// engine waits until the outcome is reported back, so at most one list is
/// ever outstanding.
pub trait CommandSink {
    /// Queues `command` for execution.
    fn submit(&mut self, command: Command);
}

impl CommandSink for Vec<Command> {
    fn submit(&mut self, command: Command) {
        self.push(command);
    }
}

impl CommandSink for VecDeque<Command> {
    fn submit(&mut self, command: Command) {
        self.push_back(command);
    }
}

impl CommandSink for crossbeam_channel::Sender<Command> {
    fn submit(&mut self, command: Command) {
        if let Err(error) = self.send(command) {
            trace_cmd!("protocol layer gone, dropping {:?}", error.into_inner());
        }
    }
}
