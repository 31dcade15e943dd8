//! Temporary directory trees and log capture for engine tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

/// A directory tree under a temporary root, removed on drop.
///
/// Paths passed to the helpers are relative to the root; missing parent
/// directories are created.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Creates an empty tree.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temporary directory"),
        }
    }

    /// Root of the tree.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `relative`.
    #[must_use]
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Creates the directory `relative` and its parents.
    pub fn mkdir(&self, relative: impl AsRef<Path>) -> &Self {
        fs::create_dir_all(self.path(relative)).expect("create directory");
        self
    }

    /// Writes `contents` to `relative`.
    pub fn write(&self, relative: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directory");
        }
        fs::write(&path, contents).expect("write file");
        self
    }

    /// Creates `count` empty files named `{prefix}{index}` in `relative`.
    pub fn populate(&self, relative: impl AsRef<Path>, prefix: &str, count: usize) -> &Self {
        let dir = self.path(relative);
        fs::create_dir_all(&dir).expect("create directory");
        for index in 0..count {
            fs::write(dir.join(format!("{prefix}{index}")), b"").expect("write file");
        }
        self
    }

    /// Creates a symbolic link at `relative` pointing to `target`.
    #[cfg(unix)]
    pub fn symlink(&self, target: impl AsRef<Path>, relative: impl AsRef<Path>) -> &Self {
        let link = self.path(relative);
        if let Some(parent) = link.parent() {
            fs::create_dir_all(parent).expect("create parent directory");
        }
        std::os::unix::fs::symlink(target, link).expect("create symlink");
        self
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `body` with a fmt subscriber filtered by `filter` installed on the
/// current thread and returns everything it logged.
///
/// Lines carry their level and target, e.g. ` INFO dirops::walk: ...`.
pub fn capture_logs(filter: EnvFilter, body: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(move || writer.clone())
        .with_target(true)
        .with_ansi(false)
        .without_time()
        .finish();
    tracing::subscriber::with_default(subscriber, body);
    let bytes = buffer.0.lock().unwrap_or_else(PoisonError::into_inner).clone();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_tree() {
        let tree = TestTree::new();
        tree.mkdir("a/b").write("a/file", "x").populate("many", "f", 3);
        assert!(tree.path("a/b").is_dir());
        assert_eq!(fs::read(tree.path("a/file")).expect("read"), b"x");
        assert_eq!(fs::read_dir(tree.path("many")).expect("list").count(), 3);
    }

    #[test]
    fn captures_only_enabled_targets() {
        let logs = capture_logs(EnvFilter::new("warn,shown=info"), || {
            tracing::info!(target: "shown", "visible line");
            tracing::info!(target: "hidden", "invisible line");
        });
        assert!(logs.contains("INFO shown: visible line"), "{logs}");
        assert!(!logs.contains("invisible"), "{logs}");
    }
}
