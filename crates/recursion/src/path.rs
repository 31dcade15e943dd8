use std::fmt::Debug;
use std::hash::Hash;
use std::path::{Path, PathBuf};

/// Path type a [`RecursionRoot`](crate::RecursionRoot) is expressed in.
///
/// The local engine uses [`PathBuf`]; the remote engine supplies its own
/// server-side path type.
pub trait TraversalPath: Clone + Debug + Eq + Hash + Send + 'static {
    /// Returns `true` for the empty path, which never names a directory.
    fn is_empty(&self) -> bool;

    /// Returns the path of `name` inside `self`.
    #[must_use]
    fn join_name(&self, name: &str) -> Self;

    /// Returns the containing directory, if any.
    fn parent_dir(&self) -> Option<Self>;

    /// Returns `true` if `other` lies strictly below `self`.
    fn is_ancestor_of(&self, other: &Self) -> bool;

    /// Returns `true` if `other` is `self` or lies below it.
    fn contains(&self, other: &Self) -> bool {
        self == other || self.is_ancestor_of(other)
    }
}

impl TraversalPath for PathBuf {
    fn is_empty(&self) -> bool {
        self.as_os_str().is_empty()
    }

    fn join_name(&self, name: &str) -> Self {
        if name.is_empty() {
            self.clone()
        } else {
            self.join(name)
        }
    }

    fn parent_dir(&self) -> Option<Self> {
        self.parent().map(Path::to_path_buf)
    }

    fn is_ancestor_of(&self, other: &Self) -> bool {
        self != other && other.starts_with(self)
    }
}
