use std::time::SystemTime;

use crate::RemotePath;

/// One entry of a remote directory listing.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RemoteEntry {
    /// Entry name.
    pub name: String,
    /// Size in bytes, when the server reports it.
    pub size: Option<u64>,
    /// Last modification time, when the server reports it.
    pub modified: Option<SystemTime>,
    /// Permission text as listed by the server, e.g. `rwxr-xr-x`.
    pub permissions: String,
    /// Attribute bits handed to filters.
    pub attributes: u32,
    /// Whether the entry is (or claims to link to) a directory.
    pub is_dir: bool,
    /// Whether the entry is a link.
    pub is_link: bool,
}

impl RemoteEntry {
    /// Creates a file entry.
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size: Some(size),
            ..Self::default()
        }
    }

    /// Creates a directory entry.
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
            ..Self::default()
        }
    }

    /// Marks the entry as a link.
    #[must_use]
    pub const fn as_link(mut self) -> Self {
        self.is_link = true;
        self
    }

    /// Sets the listed permission text.
    #[must_use]
    pub fn with_permissions(mut self, permissions: impl Into<String>) -> Self {
        self.permissions = permissions.into();
        self
    }
}

/// Result of a successful list command.
///
/// `path` is the directory the server actually listed, which differs from
/// the requested path when a link was resolved.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DirectoryListing {
    /// Listed directory.
    pub path: RemotePath,
    /// Entries in server order.
    pub entries: Vec<RemoteEntry>,
}

impl DirectoryListing {
    /// Creates a listing of `path`.
    pub fn new(path: RemotePath, entries: Vec<RemoteEntry>) -> Self {
        Self { path, entries }
    }
}

/// Outcome of a failed list command.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ListingFailure {
    /// The command was canceled; the whole operation stops.
    Canceled,
    /// A failure that retrying will not fix, such as a rejected login.
    Critical,
    /// A failure worth retrying once, such as a dropped data connection.
    Transient,
}
