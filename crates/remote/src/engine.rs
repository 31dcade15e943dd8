use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use filters::{FilterEntry, FilterPredicate};
use logging::{
    targets, trace_chmod, trace_del, trace_filter, trace_remote, trace_stats, trace_transfer,
};
use recursion::{
    ActiveFilters, DirectoryVisit, LinkKind, OperationCounters, OperationMode, RecursionRoot,
    RecursiveOperation, StartError, sanitize_name,
};

use crate::{
    Command, CommandSink, DirectoryListing, ListingFailure, PermissionConverter, RemoteEntry,
    RemoteEvent, RemoteOperationHandler, RemotePath, Site,
};

/// Depth-first traversal of remote directory trees, driven by command
/// outcomes.
///
/// The engine never performs I/O. It submits [`Command`]s to its
/// [`CommandSink`] and advances only when the protocol layer reports the
/// outcome of the outstanding list command through
/// [`process_directory_listing`](Self::process_directory_listing),
/// [`listing_failed`](Self::listing_failed),
/// [`link_is_not_dir`](Self::link_is_not_dir) or
/// [`handle_event`](Self::handle_event). Outcomes arriving while the engine
/// is idle are ignored.
///
/// A directory's subdirectories are queued ahead of its siblings, so a
/// subtree is listed completely before the next sibling. In
/// [`OperationMode::Delete`] a marker queued behind the contents removes
/// the directory itself once they have been scheduled.
pub struct RemoteRecursiveOperation<S, H> {
    mode: OperationMode,
    roots: VecDeque<RecursionRoot<RemotePath>>,
    counters: OperationCounters,
    filters: ActiveFilters,
    chmod: Option<Box<dyn PermissionConverter>>,
    replacement_char: char,
    sink: S,
    handler: H,
}

impl<S, H> RemoteRecursiveOperation<S, H>
where
    S: CommandSink,
    H: RemoteOperationHandler,
{
    /// Creates an idle engine submitting to `sink` and reporting to
    /// `handler`.
    pub fn new(sink: S, handler: H) -> Self {
        Self {
            mode: OperationMode::None,
            roots: VecDeque::new(),
            counters: OperationCounters::default(),
            filters: ActiveFilters::none(),
            chmod: None,
            replacement_char: '_',
            sink,
            handler,
        }
    }

    /// Sets the character substituted for invalid characters in local
    /// target names.
    #[must_use]
    pub const fn with_replacement_char(mut self, replacement: char) -> Self {
        self.replacement_char = replacement;
        self
    }

    /// Command sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable command sink.
    pub const fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Event handler.
    pub const fn handler(&self) -> &H {
        &self.handler
    }

    /// Mutable event handler.
    pub const fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Queues `root`. Empty roots are ignored.
    pub fn add_root(&mut self, root: RecursionRoot<RemotePath>) {
        if root.is_empty() {
            return;
        }
        trace_remote!("adding root {}", root.start());
        self.roots.push_back(root);
    }

    /// Attaches the permission converter required by
    /// [`OperationMode::Chmod`].
    pub fn set_chmod_data(&mut self, converter: impl PermissionConverter + 'static) {
        self.chmod = Some(Box::new(converter));
    }

    /// Starts the operation and submits the first command.
    ///
    /// # Errors
    ///
    /// Fails without touching the engine if an operation is active, if
    /// `mode` is [`OperationMode::None`], if `mode` is
    /// [`OperationMode::Chmod`] and no converter was set, or if no root is
    /// queued.
    pub fn start(&mut self, mode: OperationMode, filters: ActiveFilters) -> Result<(), StartError> {
        if self.mode != OperationMode::None {
            return Err(StartError::AlreadyActive);
        }
        if mode == OperationMode::None {
            return Err(StartError::UnsupportedMode(mode));
        }
        if mode == OperationMode::Chmod && self.chmod.is_none() {
            return Err(StartError::MissingChmodData);
        }
        if self.roots.is_empty() {
            return Err(StartError::NoRoots);
        }

        tracing::info!(
            target: targets::REMOTE,
            "starting {mode} over {} root(s)",
            self.roots.len()
        );
        self.mode = mode;
        self.filters = filters;
        self.counters.reset();
        self.next_operation();
        Ok(())
    }

    /// Cancels the operation: clears roots, counters and permission data.
    ///
    /// A command already submitted is left to the protocol layer; its
    /// outcome is ignored.
    pub fn stop(&mut self) {
        if self.mode != OperationMode::None {
            trace_remote!("stopping {}", self.mode);
        }
        self.mode = OperationMode::None;
        self.roots.clear();
        self.chmod = None;
        self.filters = ActiveFilters::none();
        self.counters.reset();
    }

    /// Dispatches a protocol outcome to the matching entry point.
    pub fn handle_event(&mut self, event: RemoteEvent) {
        match event {
            RemoteEvent::Listing(listing) => self.process_directory_listing(&listing),
            RemoteEvent::ListingFailed(failure) => self.listing_failed(failure),
            RemoteEvent::LinkIsNotDir(site) => self.link_is_not_dir(site.as_ref()),
        }
    }

    /// Processes the listing answering the outstanding list command.
    pub fn process_directory_listing(&mut self, listing: &DirectoryListing) {
        if self.mode == OperationMode::None {
            return;
        }
        let Some(root) = self.roots.front_mut() else {
            return;
        };
        let Some(mut visit) = root.pop_front() else {
            self.next_operation();
            return;
        };

        if visit.link == LinkKind::AddedByCaller {
            visit.start_override = Some(listing.path.clone());
        }
        if !root.confines(&listing.path, visit.start_override.as_ref()) {
            trace_remote!(
                "listing of {} is outside of {}, skipping",
                listing.path,
                root.start()
            );
            self.next_operation();
            return;
        }

        if self.mode == OperationMode::Delete && visit.recurse && !visit.child.is_empty() {
            root.push_front(visit.deferred());
        }

        if visit.link.is_link() && !visit.recurse {
            trace_remote!("not following link {}", listing.path);
            self.next_operation();
            return;
        }
        if !root.mark_visited(listing.path.clone()) {
            self.next_operation();
            return;
        }

        self.counters.add_directory();
        tracing::info!(
            target: targets::REMOTE,
            "processing {} ({} entries)",
            listing.path,
            listing.entries.len()
        );
        if listing.entries.is_empty() && self.mode == OperationMode::Transfer {
            self.handler
                .empty_directory(&listing.path, visit.target_dir.as_deref());
        } else {
            self.process_entries(&visit, listing);
        }

        self.handler.listing_ended();
        self.next_operation();
    }

    /// Handles a failed list command.
    ///
    /// Cancellation stops the operation. Other failures retry the listing
    /// once, unless critical, and otherwise skip the directory.
    pub fn listing_failed(&mut self, failure: ListingFailure) {
        if self.mode == OperationMode::None {
            return;
        }
        if failure == ListingFailure::Canceled {
            tracing::info!(target: targets::REMOTE, "listing canceled, stopping {}", self.mode);
            self.stop();
            self.handler.operation_canceled();
            return;
        }

        let Some(root) = self.roots.front_mut() else {
            return;
        };
        let Some(mut visit) = root.pop_front() else {
            self.next_operation();
            return;
        };

        if failure != ListingFailure::Critical && !visit.retried {
            tracing::warn!(
                target: targets::REMOTE,
                "listing {} failed, retrying",
                visit.path()
            );
            visit.retried = true;
            root.push_front(visit);
        } else {
            tracing::warn!(
                target: targets::REMOTE,
                "listing {} failed ({failure:?}), skipping",
                visit.path()
            );
            if self.mode == OperationMode::Delete && visit.recurse && !visit.child.is_empty() {
                root.push_front(visit.deferred());
            }
        }
        self.next_operation();
    }

    /// Handles a link queued as a directory that resolved to something else.
    ///
    /// Without a site the entry is skipped. In delete mode the link itself
    /// is removed; in other modes except listing the handler is told.
    pub fn link_is_not_dir(&mut self, site: Option<&Site>) {
        if self.mode == OperationMode::None {
            return;
        }
        let Some(visit) = self.roots.front_mut().and_then(RecursionRoot::pop_front) else {
            self.next_operation();
            return;
        };

        if let Some(site) = site {
            match self.mode {
                OperationMode::Delete => {
                    if !visit.child.is_empty() {
                        trace_del!("removing link {}", visit.path());
                        self.sink.submit(Command::RemoveFiles {
                            path: visit.parent,
                            names: vec![visit.child],
                        });
                    }
                }
                OperationMode::List => {}
                mode => {
                    let local_dir = visit.target_dir.map(|target| {
                        if mode.is_flatten() {
                            target
                        } else {
                            target.parent().map_or(target.clone(), Path::to_path_buf)
                        }
                    });
                    self.handler.invalid_directory_link(
                        site,
                        local_dir.as_deref(),
                        &visit.parent,
                        &visit.child,
                    );
                }
            }
        }
        self.next_operation();
    }

    /// Submits commands until a list command is outstanding or every root
    /// is exhausted.
    fn next_operation(&mut self) {
        if self.mode == OperationMode::None {
            return;
        }

        while let Some(root) = self.roots.front_mut() {
            while let Some(visit) = root.front() {
                if self.mode == OperationMode::Delete && visit.is_deferred() {
                    if let Some(marker) = root.pop_front() {
                        trace_del!("removing directory {}", marker.path());
                        self.sink.submit(Command::RemoveDirectory {
                            path: marker.parent,
                            name: marker.child,
                        });
                    }
                    continue;
                }

                trace_remote!("listing {}", visit.path());
                self.sink.submit(Command::List {
                    path: visit.parent.clone(),
                    name: visit.child.clone(),
                    as_link: visit.link == LinkKind::AddedByCaller,
                });
                return;
            }
            self.roots.pop_front();
        }

        self.finish();
    }

    fn finish(&mut self) {
        trace_stats!(
            "{} finished: {} files, {} directories",
            self.mode,
            self.counters.files,
            self.counters.directories
        );
        self.mode = OperationMode::None;
        self.chmod = None;
        self.filters = ActiveFilters::none();
        self.handler.operation_finished();
    }

    /// Dispatches the entries of `listing`, last to first, so that queueing
    /// subdirectories at the front keeps their listed order.
    fn process_entries(&mut self, visit: &DirectoryVisit<RemotePath>, listing: &DirectoryListing) {
        let Self {
            mode,
            roots,
            counters,
            filters,
            chmod,
            replacement_char,
            sink,
            handler,
        } = self;
        let mode = *mode;
        let Some(root) = roots.front_mut() else {
            return;
        };
        let filter_dir = Path::new(listing.path.as_str());
        let mut doomed = Vec::new();

        for entry in listing.entries.iter().rev() {
            if let Some(only) = &visit.restrict_to {
                if entry.name != *only {
                    continue;
                }
            } else {
                let candidate = FilterEntry {
                    name: &entry.name,
                    path: filter_dir,
                    is_dir: entry.is_dir,
                    size: entry.size,
                    attributes: entry.attributes,
                    modified: entry.modified,
                };
                if filters.remote.filtered(&candidate) {
                    trace_filter!("skipping {}/{}", listing.path, entry.name);
                    continue;
                }
            }

            if mode == OperationMode::Chmod {
                if let Some(converter) = chmod.as_deref() {
                    submit_chmod(sink, converter, &listing.path, entry);
                }
            }

            if entry.is_dir && !(entry.is_link && mode == OperationMode::Delete) {
                if visit.recurse {
                    let target = child_target(
                        visit.target_dir.as_ref(),
                        &entry.name,
                        mode,
                        *replacement_char,
                    );
                    let mut child = DirectoryVisit::new(listing.path.clone(), entry.name.clone())
                        .with_target(target);
                    child.start_override.clone_from(&visit.start_override);
                    if entry.is_link {
                        child.link = LinkKind::AddedDuringTraversal;
                        child.recurse = false;
                    }
                    root.push_front(child);
                }
                continue;
            }

            counters.add_file();
            match mode {
                OperationMode::Transfer | OperationMode::TransferFlatten => {
                    trace_transfer!("transfer {}/{}", listing.path, entry.name);
                    handler.transfer_file(entry, &listing.path, visit.target_dir.as_deref());
                }
                OperationMode::Delete => doomed.push(entry.name.clone()),
                _ => {}
            }
        }

        if !doomed.is_empty() {
            doomed.reverse();
            trace_del!("removing {} file(s) in {}", doomed.len(), listing.path);
            sink.submit(Command::RemoveFiles {
                path: listing.path.clone(),
                names: doomed,
            });
        }
    }
}

fn child_target(
    parent: Option<&PathBuf>,
    name: &str,
    mode: OperationMode,
    replacement: char,
) -> Option<PathBuf> {
    parent.map(|target| {
        if mode.is_flatten() {
            target.clone()
        } else {
            target.join(sanitize_name(name, replacement).as_ref())
        }
    })
}

fn submit_chmod<S: CommandSink>(
    sink: &mut S,
    converter: &dyn PermissionConverter,
    path: &RemotePath,
    entry: &RemoteEntry,
) {
    if !converter.apply_scope().includes(entry.is_dir) {
        return;
    }
    let existing = converter.convert(&entry.permissions);
    let permissions = converter.new_permissions(existing, entry.is_dir);
    if permissions.is_empty() {
        trace_chmod!(
            "cannot change permissions '{}' of {path}/{}",
            entry.permissions,
            entry.name
        );
        return;
    }
    trace_chmod!("chmod {permissions} {path}/{}", entry.name);
    sink.submit(Command::Chmod {
        path: path.clone(),
        name: entry.name.clone(),
        permissions,
    });
}

impl<S, H> RecursiveOperation for RemoteRecursiveOperation<S, H>
where
    S: CommandSink,
    H: RemoteOperationHandler,
{
    fn operation_mode(&self) -> OperationMode {
        self.mode
    }

    fn counters(&self) -> OperationCounters {
        self.counters
    }

    fn root_count(&self) -> usize {
        self.roots.len()
    }

    fn stop(&mut self) {
        Self::stop(self);
    }
}
