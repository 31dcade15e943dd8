use std::fs;
use std::time::SystemTime;

/// One file or directory found while scanning a local directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListingEntry {
    /// Entry name, lossily converted to UTF-8.
    pub name: String,
    /// Size in bytes; `None` for directories.
    pub size: Option<u64>,
    /// Last modification time, when the platform reports one.
    pub modified: Option<SystemTime>,
    /// Permission bits on Unix, the read-only flag elsewhere.
    pub attributes: u32,
    /// Whether the entry is a symbolic link.
    pub is_link: bool,
}

impl ListingEntry {
    /// Describes `entry`, following symbolic links.
    ///
    /// Returns the entry and whether it is (or links to) a directory, or
    /// `None` when it vanished or is a link and `ignore_links` is set. A
    /// dangling link is reported as a file.
    pub(crate) fn from_dir_entry(entry: &fs::DirEntry, ignore_links: bool) -> Option<(Self, bool)> {
        let file_type = entry.file_type().ok()?;
        let is_link = file_type.is_symlink();
        if is_link && ignore_links {
            return None;
        }

        let metadata = if is_link {
            fs::metadata(entry.path())
                .or_else(|_| entry.metadata())
                .ok()?
        } else {
            entry.metadata().ok()?
        };
        let is_dir = metadata.is_dir();

        let listed = Self {
            name: entry.file_name().to_string_lossy().into_owned(),
            size: (!is_dir).then(|| metadata.len()),
            modified: metadata.modified().ok(),
            attributes: attributes(&metadata),
            is_link,
        };
        Some((listed, is_dir))
    }
}

#[cfg(unix)]
fn attributes(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode()
}

#[cfg(not(unix))]
fn attributes(metadata: &fs::Metadata) -> u32 {
    u32::from(metadata.permissions().readonly())
}
