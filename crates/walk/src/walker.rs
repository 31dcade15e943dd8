use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, MutexGuard};
use std::thread;

use filters::{FilterEntry, FilterPredicate};
use logging::{targets, trace_filter, trace_walk};
use recursion::{DirectoryVisit, LinkKind, OperationMode, sanitize_name};

use crate::engine::{Shared, State};
use crate::{ListingBatch, ListingEntry};

struct ScanSettings {
    filter: Arc<dyn FilterPredicate>,
    ignore_links: bool,
    capacity: usize,
    run: u64,
}

/// Worker loop: scans queued directories root by root until the queue is
/// exhausted or run `run` is cancelled.
pub(crate) fn run(shared: &Shared, run: u64) {
    let mut state = shared.lock();
    state.worker_thread = Some(thread::current().id());

    loop {
        if state.mode == OperationMode::None || state.run != run {
            trace_walk!("worker observed cancellation");
            return;
        }
        let Some(root) = state.roots.front_mut() else {
            break;
        };
        let Some(visit) = root.pop_front() else {
            state.roots.pop_front();
            continue;
        };

        let path = visit.path();
        drop(state);
        let key = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        state = shared.lock();
        if state.is_cancelled(run) {
            trace_walk!("worker observed cancellation");
            return;
        }
        let Some(root) = state.roots.front_mut() else {
            return;
        };
        if !root.mark_visited(key) {
            continue;
        }
        state.counters.add_directory();

        let settings = ScanSettings {
            filter: Arc::clone(&state.filters.local),
            ignore_links: state.ignore_links,
            capacity: shared.config.batch_capacity,
            run,
        };
        drop(state);

        match scan_directory(shared, &visit, &path, &settings) {
            Some(next) => state = next,
            None => {
                trace_walk!("worker observed cancellation");
                return;
            }
        }
    }

    trace_walk!("traversal complete");
    let _ = deliver(shared, state, ListingBatch::end_of_traversal(), None, run);
}

/// Scans `path`, delivering a batch whenever the capacity is reached and the
/// remainder at the end. Read errors leave the listing empty.
///
/// Returns the re-acquired lock, or `None` if the operation was cancelled.
fn scan_directory<'a>(
    shared: &'a Shared,
    visit: &DirectoryVisit<PathBuf>,
    path: &Path,
    settings: &ScanSettings,
) -> Option<MutexGuard<'a, State>> {
    tracing::info!(target: targets::WALK, "scanning {}", path.display());
    let fresh = || ListingBatch::new(path.to_path_buf(), visit.target_dir.clone());
    let mut batch = fresh();
    let mut partial = false;

    match fs::read_dir(path) {
        Ok(read_dir) => {
            for entry in read_dir.flatten() {
                let Some((listed, is_dir)) =
                    ListingEntry::from_dir_entry(&entry, settings.ignore_links)
                else {
                    continue;
                };
                let candidate = FilterEntry {
                    name: &listed.name,
                    path,
                    is_dir,
                    size: listed.size,
                    attributes: listed.attributes,
                    modified: listed.modified,
                };
                if settings.filter.filtered(&candidate) {
                    trace_filter!("skipping {}", candidate.full_path().display());
                    continue;
                }

                if is_dir {
                    batch.dirs.push(listed);
                } else {
                    batch.files.push(listed);
                }

                if batch.len() >= settings.capacity {
                    let full = std::mem::replace(&mut batch, fresh());
                    drop(deliver(shared, shared.lock(), full, Some(visit), settings.run)?);
                    partial = true;
                }
            }
        }
        Err(error) => {
            trace_walk!("cannot read {}: {error}", path.display());
        }
    }

    let state = shared.lock();
    if partial && batch.is_empty() {
        return (!state.is_cancelled(settings.run)).then_some(state);
    }
    deliver(shared, state, batch, Some(visit), settings.run)
}

/// Queues the batch's subdirectories on the current root and appends the
/// batch to the delivered list, notifying the consumer on the first one.
fn deliver<'a>(
    shared: &'a Shared,
    mut state: MutexGuard<'a, State>,
    batch: ListingBatch,
    visit: Option<&DirectoryVisit<PathBuf>>,
    run: u64,
) -> Option<MutexGuard<'a, State>> {
    if !batch.is_terminal() && state.is_cancelled(run) {
        return None;
    }

    if let Some(visit) = visit.filter(|visit| visit.recurse) {
        let flatten = state.mode.is_flatten();
        let replacement = shared.config.replacement_char;
        let root = state.roots.front_mut()?;
        for dir in &batch.dirs {
            let target = visit.target_dir.as_ref().map(|target| {
                if flatten {
                    target.clone()
                } else {
                    target.join(sanitize_name(&dir.name, replacement).as_ref())
                }
            });
            let link = if dir.is_link {
                LinkKind::AddedDuringTraversal
            } else {
                LinkKind::NotALink
            };
            root.add_dir_to_visit(batch.source.clone(), dir.name.clone(), target, true, link);
        }
    }

    state.counters.add_files(batch.files.len());
    let first = state.delivered.is_empty();
    state.delivered.push_back(batch);
    if first {
        drop(state);
        shared.notifier.batch_available();
        state = shared.lock();
        if state.is_cancelled(run) {
            return None;
        }
    }
    Some(state)
}
