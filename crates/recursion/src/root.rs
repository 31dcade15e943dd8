use std::collections::VecDeque;
use std::path::PathBuf;

use logging::{trace_dup, trace_queue};
use rustc_hash::FxHashSet;

use crate::{DirectoryVisit, LinkKind, TraversalPath};

/// One top-level traversal task.
///
/// A root owns its start path, the queue of pending [`DirectoryVisit`]s and
/// the set of directories already enumerated. The set is the cycle guard: a
/// path is listed at most once per root however many links lead to it.
#[derive(Clone, Debug)]
pub struct RecursionRoot<P> {
    start: P,
    allow_parent: bool,
    visited: FxHashSet<P>,
    pending: VecDeque<DirectoryVisit<P>>,
}

impl<P: TraversalPath> RecursionRoot<P> {
    /// Creates a root for `start`.
    ///
    /// `allow_parent` lets the root list the parent of `start`, which is
    /// needed when the operation also acts on the start directory's own
    /// entry.
    pub fn new(start: P, allow_parent: bool) -> Self {
        Self {
            start,
            allow_parent,
            visited: FxHashSet::default(),
            pending: VecDeque::new(),
        }
    }

    /// Queues `child` inside `parent` for listing.
    pub fn add_dir_to_visit(
        &mut self,
        parent: P,
        child: impl Into<String>,
        target_dir: Option<PathBuf>,
        recurse: bool,
        link: LinkKind,
    ) {
        let visit = DirectoryVisit::new(parent, child)
            .with_target(target_dir)
            .with_recurse(recurse)
            .with_link(link);
        self.push_back(visit);
    }

    /// Queues a listing of `parent` of which only the entry `name` is
    /// processed.
    pub fn add_dir_to_visit_restricted(
        &mut self,
        parent: P,
        name: impl Into<String>,
        recurse: bool,
    ) {
        let visit = DirectoryVisit::new(parent, String::new())
            .restricted_to(name)
            .with_recurse(recurse);
        self.push_back(visit);
    }

    /// Start path of the root.
    pub const fn start(&self) -> &P {
        &self.start
    }

    /// Whether the parent of the start path may be listed.
    pub const fn allow_parent(&self) -> bool {
        self.allow_parent
    }

    /// Returns `true` when there is nothing to visit.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() || self.start.is_empty()
    }

    /// Number of queued visits.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Next queued visit.
    pub fn front(&self) -> Option<&DirectoryVisit<P>> {
        self.pending.front()
    }

    /// Removes the next queued visit.
    pub fn pop_front(&mut self) -> Option<DirectoryVisit<P>> {
        self.pending.pop_front()
    }

    /// Queues a visit after all pending ones.
    pub fn push_back(&mut self, visit: DirectoryVisit<P>) {
        trace_queue!("queue {:?} / {:?}", visit.parent, visit.child);
        self.pending.push_back(visit);
    }

    /// Queues a visit ahead of all pending ones.
    pub fn push_front(&mut self, visit: DirectoryVisit<P>) {
        trace_queue!("queue first {:?} / {:?}", visit.parent, visit.child);
        self.pending.push_front(visit);
    }

    /// Records `path` as enumerated. Returns `false` if it already was.
    pub fn mark_visited(&mut self, path: P) -> bool {
        if self.visited.contains(&path) {
            trace_dup!("{path:?} already visited, skipping");
            return false;
        }
        self.visited.insert(path)
    }

    /// Returns `true` if `path` has been enumerated in this root.
    pub fn has_visited(&self, path: &P) -> bool {
        self.visited.contains(path)
    }

    /// Returns `true` if a listing of `path` belongs to this root.
    ///
    /// With a `start_override` (set below caller-added links) only that
    /// subtree qualifies. Otherwise the start path's subtree does, plus the
    /// start path's parent when [`allow_parent`](Self::allow_parent) is set.
    pub fn confines(&self, path: &P, start_override: Option<&P>) -> bool {
        if let Some(base) = start_override {
            return base.contains(path);
        }
        if self.start.contains(path) {
            return true;
        }
        self.allow_parent && self.start.parent_dir().as_ref() == Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> RecursionRoot<PathBuf> {
        RecursionRoot::new(PathBuf::from("/data/start"), false)
    }

    #[test]
    fn empty_without_visits_or_start() {
        let mut queued = root();
        assert!(queued.is_empty());
        queued.add_dir_to_visit(
            PathBuf::from("/data/start"),
            "",
            None,
            true,
            LinkKind::NotALink,
        );
        assert!(!queued.is_empty());

        let mut blank = RecursionRoot::new(PathBuf::new(), false);
        blank.add_dir_to_visit(PathBuf::from("/x"), "", None, true, LinkKind::NotALink);
        assert!(blank.is_empty());
    }

    #[test]
    fn queue_order() {
        let mut root = root();
        let base = PathBuf::from("/data/start");
        root.add_dir_to_visit(base.clone(), "a", None, true, LinkKind::NotALink);
        root.add_dir_to_visit(base.clone(), "b", None, true, LinkKind::NotALink);
        root.push_front(DirectoryVisit::new(base, "first"));
        let names: Vec<_> = std::iter::from_fn(|| root.pop_front())
            .map(|visit| visit.child)
            .collect();
        assert_eq!(names, ["first", "a", "b"]);
    }

    #[test]
    fn restricted_visit_lists_parent() {
        let mut root = RecursionRoot::new(PathBuf::from("/data/start"), true);
        root.add_dir_to_visit_restricted(PathBuf::from("/data"), "start", true);
        let visit = root.front().expect("queued");
        assert_eq!(visit.path(), PathBuf::from("/data"));
        assert_eq!(visit.restrict_to.as_deref(), Some("start"));
    }

    #[test]
    fn visited_guard() {
        let mut root = root();
        assert!(root.mark_visited(PathBuf::from("/data/start")));
        assert!(!root.mark_visited(PathBuf::from("/data/start")));
        assert!(root.has_visited(&PathBuf::from("/data/start")));
    }

    #[test]
    fn confinement() {
        let strict = root();
        assert!(strict.confines(&PathBuf::from("/data/start"), None));
        assert!(strict.confines(&PathBuf::from("/data/start/deep"), None));
        assert!(!strict.confines(&PathBuf::from("/data"), None));
        assert!(!strict.confines(&PathBuf::from("/elsewhere"), None));

        let lenient = RecursionRoot::new(PathBuf::from("/data/start"), true);
        assert!(lenient.confines(&PathBuf::from("/data"), None));
        assert!(!lenient.confines(&PathBuf::from("/"), None));

        let link_target = PathBuf::from("/mnt/target");
        assert!(strict.confines(&PathBuf::from("/mnt/target/x"), Some(&link_target)));
        assert!(!strict.confines(&PathBuf::from("/data/start"), Some(&link_target)));
    }
}
