use std::path::{Path, PathBuf};

use crate::ListingEntry;

/// Entries found in one scanned directory.
///
/// A directory with more entries than the configured capacity is delivered
/// as several batches with the same [`source`](Self::source). An empty,
/// non-terminal batch means the directory had no (unfiltered) entries. The
/// last batch of a traversal is [terminal](Self::is_terminal).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ListingBatch {
    /// Scanned directory.
    pub source: PathBuf,
    /// Local target directory of the visit, for transfer modes.
    pub target: Option<PathBuf>,
    /// Non-directory entries.
    pub files: Vec<ListingEntry>,
    /// Directory entries, including links to directories.
    pub dirs: Vec<ListingEntry>,
    terminal: bool,
}

impl ListingBatch {
    pub(crate) fn new(source: PathBuf, target: Option<PathBuf>) -> Self {
        Self {
            source,
            target,
            ..Self::default()
        }
    }

    pub(crate) fn end_of_traversal() -> Self {
        Self {
            terminal: true,
            ..Self::default()
        }
    }

    /// Combined number of files and directories.
    pub fn len(&self) -> usize {
        self.files.len() + self.dirs.len()
    }

    /// Returns `true` if the batch holds no entry.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.dirs.is_empty()
    }

    /// Returns `true` for the batch signalling the end of the traversal.
    pub const fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Returns the target directory, if any.
    pub fn target(&self) -> Option<&Path> {
        self.target.as_deref()
    }
}
