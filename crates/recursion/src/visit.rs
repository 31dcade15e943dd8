use std::path::PathBuf;

use crate::TraversalPath;

/// How a visit request was linked into the traversal.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum LinkKind {
    /// A plain directory.
    #[default]
    NotALink,
    /// A link found in a listing; whether it points at a directory is not
    /// yet known.
    AddedDuringTraversal,
    /// A link the caller queued explicitly.
    AddedByCaller,
}

impl LinkKind {
    /// Returns `true` for either link variant.
    #[must_use]
    pub const fn is_link(self) -> bool {
        !matches!(self, Self::NotALink)
    }
}

/// Whether a request lists a directory or acts on it after its contents.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum VisitKind {
    /// List the directory and schedule its contents.
    #[default]
    Enumerate,
    /// Deferred marker: the directory's contents have been scheduled and the
    /// directory itself can now be removed.
    RemoveAfterContents,
}

/// One queued directory visit.
///
/// An empty [`child`](Self::child) means the parent path itself is visited.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DirectoryVisit<P> {
    /// Directory containing the visited entry.
    pub parent: P,
    /// Name of the visited entry inside `parent`.
    pub child: String,
    /// Local directory mirroring this one, for transfer modes.
    pub target_dir: Option<PathBuf>,
    /// Whether subdirectories found in the listing are queued too.
    pub recurse: bool,
    /// Link classification.
    pub link: LinkKind,
    /// When set, only the entry with this name is processed from the listing.
    pub restrict_to: Option<String>,
    /// Listing request or deferred post-order marker.
    pub kind: VisitKind,
    /// Set once a failed listing has been retried.
    pub retried: bool,
    /// Confinement base inherited from a caller-added link.
    pub start_override: Option<P>,
}

impl<P: TraversalPath> DirectoryVisit<P> {
    /// Creates a recursing listing request for `child` inside `parent`.
    pub fn new(parent: P, child: impl Into<String>) -> Self {
        Self {
            parent,
            child: child.into(),
            target_dir: None,
            recurse: true,
            link: LinkKind::NotALink,
            restrict_to: None,
            kind: VisitKind::Enumerate,
            retried: false,
            start_override: None,
        }
    }

    /// Sets the local mirror directory.
    pub fn with_target(mut self, target: Option<PathBuf>) -> Self {
        self.target_dir = target;
        self
    }

    /// Sets whether subdirectories are queued.
    pub const fn with_recurse(mut self, recurse: bool) -> Self {
        self.recurse = recurse;
        self
    }

    /// Sets the link classification.
    pub const fn with_link(mut self, link: LinkKind) -> Self {
        self.link = link;
        self
    }

    /// Restricts processing of the listing to the entry `name`.
    pub fn restricted_to(mut self, name: impl Into<String>) -> Self {
        self.restrict_to = Some(name.into());
        self
    }

    /// Returns the full path of the visited directory.
    pub fn path(&self) -> P {
        self.parent.join_name(&self.child)
    }

    /// Returns the post-order marker for this request.
    #[must_use]
    pub fn deferred(&self) -> Self {
        Self {
            kind: VisitKind::RemoveAfterContents,
            retried: false,
            ..self.clone()
        }
    }

    /// Returns `true` for a deferred post-order marker.
    pub fn is_deferred(&self) -> bool {
        self.kind == VisitKind::RemoveAfterContents
    }
}
