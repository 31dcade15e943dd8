use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Attributes of one directory entry presented to a [`FilterPredicate`].
#[derive(Clone, Copy, Debug)]
pub struct FilterEntry<'a> {
    /// Entry name without any directory component.
    pub name: &'a str,
    /// Directory containing the entry.
    pub path: &'a Path,
    /// Whether the entry is a directory (or a link to one).
    pub is_dir: bool,
    /// Size in bytes, when known.
    pub size: Option<u64>,
    /// Platform attribute bits (permission bits on Unix).
    pub attributes: u32,
    /// Last modification time, when known.
    pub modified: Option<SystemTime>,
}

impl FilterEntry<'_> {
    /// Returns the entry's full path.
    #[must_use]
    pub fn full_path(&self) -> PathBuf {
        self.path.join(self.name)
    }
}

/// Decides whether a directory entry is excluded from an operation.
///
/// Implemented by [`crate::FilterSet`], by [`NoFilter`] and by any closure
/// `Fn(&FilterEntry) -> bool`.
pub trait FilterPredicate: Send + Sync {
    /// Returns `true` when the entry must be dropped.
    fn filtered(&self, entry: &FilterEntry<'_>) -> bool;
}

impl<F> FilterPredicate for F
where
    F: Fn(&FilterEntry<'_>) -> bool + Send + Sync,
{
    fn filtered(&self, entry: &FilterEntry<'_>) -> bool {
        self(entry)
    }
}

/// Predicate that never filters anything.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NoFilter;

impl FilterPredicate for NoFilter {
    fn filtered(&self, _entry: &FilterEntry<'_>) -> bool {
        false
    }
}
