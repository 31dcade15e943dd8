//! In-memory remote site used by the remote engine integration tests.
//!
//! [`MemoryServer`] plays the protocol layer: it executes the commands the
//! engine submits against a directory table and reports list outcomes back
//! as [`RemoteEvent`]s.

#![allow(dead_code)]

use std::collections::BTreeMap;

use crossbeam_channel::Receiver;
use dirops::recursion::TraversalPath;
use dirops::remote::{
    Command, DirectoryListing, ListingFailure, RemoteEntry, RemoteEvent, RemoteOperationHandler,
    RemotePath, RemoteRecursiveOperation,
};

pub type ChannelEngine<H> = RemoteRecursiveOperation<crossbeam_channel::Sender<Command>, H>;

pub fn path(text: &str) -> RemotePath {
    RemotePath::parse(text).expect("valid remote path")
}

/// Directory table keyed by absolute path. `/` always exists.
#[derive(Debug)]
pub struct MemoryServer {
    pub dirs: BTreeMap<String, Vec<RemoteEntry>>,
    pub executed: Vec<Command>,
    /// Directories a removal was refused for because they had contents.
    pub refused: Vec<String>,
}

impl Default for MemoryServer {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryServer {
    pub fn new() -> Self {
        Self {
            dirs: BTreeMap::from([("/".to_owned(), Vec::new())]),
            executed: Vec::new(),
            refused: Vec::new(),
        }
    }

    /// Adds `entry` to the directory `parent` and returns the entry's path.
    ///
    /// Directories that are not links get their own empty table entry.
    pub fn add(&mut self, parent: &str, entry: RemoteEntry) -> String {
        let full = path(parent).join_name(&entry.name).to_string();
        if entry.is_dir && !entry.is_link {
            self.dirs.entry(full.clone()).or_default();
        }
        self.dirs
            .get_mut(parent)
            .unwrap_or_else(|| panic!("no directory {parent}"))
            .push(entry);
        full
    }

    pub fn mkdir(&mut self, parent: &str, name: &str) -> String {
        self.add(parent, RemoteEntry::dir(name))
    }

    pub fn touch(&mut self, parent: &str, name: &str) -> String {
        self.add(parent, RemoteEntry::file(name, 1))
    }

    pub fn entry(&self, dir: &str, name: &str) -> Option<&RemoteEntry> {
        self.dirs.get(dir)?.iter().find(|entry| entry.name == name)
    }

    /// Executes one command, returning the outcome of list commands.
    ///
    /// Removing a directory that still has contents is refused and
    /// recorded in [`refused`](Self::refused).
    ///
    /// # Panics
    ///
    /// Panics when a removal or chmod targets a missing entry.
    pub fn execute(&mut self, command: &Command) -> Option<RemoteEvent> {
        self.executed.push(command.clone());
        match command {
            Command::List { path: dir, name, .. } => {
                let full = dir.join_name(name);
                Some(match self.dirs.get(full.as_str()) {
                    Some(entries) => {
                        RemoteEvent::Listing(DirectoryListing::new(full, entries.clone()))
                    }
                    None if self.entry(dir.as_str(), name).is_some() => {
                        RemoteEvent::LinkIsNotDir(None)
                    }
                    None => RemoteEvent::ListingFailed(ListingFailure::Critical),
                })
            }
            Command::RemoveFiles { path: dir, names } => {
                for name in names {
                    self.remove_entry(dir.as_str(), name);
                }
                None
            }
            Command::RemoveDirectory { path: dir, name } => {
                let full = dir.join_name(name).to_string();
                let contents = self
                    .dirs
                    .get(&full)
                    .unwrap_or_else(|| panic!("removing missing directory {full}"));
                if contents.is_empty() {
                    self.dirs.remove(&full);
                    self.remove_entry(dir.as_str(), name);
                } else {
                    self.refused.push(full);
                }
                None
            }
            Command::Chmod {
                path: dir,
                name,
                permissions,
            } => {
                let entry = self
                    .dirs
                    .get_mut(dir.as_str())
                    .and_then(|entries| entries.iter_mut().find(|entry| entry.name == *name))
                    .unwrap_or_else(|| panic!("chmod of missing entry {dir}/{name}"));
                entry.permissions.clone_from(permissions);
                None
            }
        }
    }

    /// Executes queued commands until the engine submits no more.
    pub fn serve<H: RemoteOperationHandler>(
        &mut self,
        engine: &mut ChannelEngine<H>,
        commands: &Receiver<Command>,
    ) {
        while let Ok(command) = commands.try_recv() {
            if let Some(event) = self.execute(&command) {
                engine.handle_event(event);
            }
        }
    }

    fn remove_entry(&mut self, dir: &str, name: &str) {
        let entries = self
            .dirs
            .get_mut(dir)
            .unwrap_or_else(|| panic!("no directory {dir}"));
        let index = entries
            .iter()
            .position(|entry| entry.name == name)
            .unwrap_or_else(|| panic!("removing missing entry {dir}/{name}"));
        entries.remove(index);
    }
}
