use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use crossbeam_channel::Receiver;
use logging::{trace_stats, trace_walk};
use rayon::ThreadPool;
use recursion::{
    ActiveFilters, OperationCounters, OperationMode, RecursionRoot, RecursiveOperation, StartError,
};

use crate::walker;
use crate::{BatchNotifier, ListingBatch, LocalOperationHandler, LocalTraversalConfig};

pub(crate) struct State {
    pub(crate) mode: OperationMode,
    /// Bumped by every start and stop; a worker serves one value.
    pub(crate) run: u64,
    pub(crate) roots: VecDeque<RecursionRoot<PathBuf>>,
    pub(crate) counters: OperationCounters,
    pub(crate) filters: ActiveFilters,
    pub(crate) ignore_links: bool,
    pub(crate) delivered: VecDeque<ListingBatch>,
    pub(crate) worker_thread: Option<ThreadId>,
    worker_done: Option<Receiver<()>>,
}

impl State {
    pub(crate) fn is_cancelled(&self, run: u64) -> bool {
        self.run != run || self.mode == OperationMode::None || self.roots.is_empty()
    }
}

pub(crate) struct Shared {
    state: Mutex<State>,
    pub(crate) notifier: Box<dyn BatchNotifier>,
    pub(crate) config: LocalTraversalConfig,
}

impl Shared {
    pub(crate) fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle to a pending worker, joined outside the lock.
struct WorkerHandle {
    done: Receiver<()>,
    thread: Option<ThreadId>,
}

impl WorkerHandle {
    fn join(self) {
        if self.thread == Some(thread::current().id()) {
            return;
        }
        // Disconnection means the worker is gone as well.
        let _ = self.done.recv();
    }
}

/// Breadth-first traversal of local directory trees.
///
/// The engine owns a queue of [`RecursionRoot`]s. [`start`](Self::start)
/// hands them to a worker that scans one directory at a time, drops filtered
/// entries and delivers the survivors as [`ListingBatch`]es. The consumer is
/// woken through its [`BatchNotifier`] and pulls batches with
/// [`next_batch`](Self::next_batch) or [`drain`](Self::drain).
///
/// The worker runs on the configured [`rayon`] pool, or on the caller's
/// thread inside `start` when no pool is set. Handles are cheap to clone and
/// all refer to the same engine.
#[derive(Clone)]
pub struct LocalRecursiveOperation {
    shared: Arc<Shared>,
    pool: Option<Arc<ThreadPool>>,
}

impl LocalRecursiveOperation {
    pub(crate) fn from_parts(
        notifier: Box<dyn BatchNotifier>,
        config: LocalTraversalConfig,
        pool: Option<Arc<ThreadPool>>,
    ) -> Self {
        let state = State {
            mode: OperationMode::None,
            run: 0,
            roots: VecDeque::new(),
            counters: OperationCounters::default(),
            filters: ActiveFilters::none(),
            ignore_links: false,
            delivered: VecDeque::new(),
            worker_thread: None,
            worker_done: None,
        };
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                notifier,
                config,
            }),
            pool,
        }
    }

    /// Queues `root`. Empty roots are ignored.
    pub fn add_root(&self, root: RecursionRoot<PathBuf>) {
        if root.is_empty() {
            return;
        }
        trace_walk!("adding root {}", root.start().display());
        self.shared.lock().roots.push_back(root);
    }

    /// Starts traversing the queued roots.
    ///
    /// Without a pool the whole traversal runs before this returns.
    ///
    /// # Errors
    ///
    /// Fails without touching the engine if an operation is active, if
    /// `mode` is [`OperationMode::Chmod`] or [`OperationMode::None`], or if
    /// no root is queued.
    pub fn start(
        &self,
        mode: OperationMode,
        filters: ActiveFilters,
        ignore_links: bool,
    ) -> Result<(), StartError> {
        let (stale, done, run) = {
            let mut state = self.shared.lock();
            if state.mode != OperationMode::None {
                return Err(StartError::AlreadyActive);
            }
            if matches!(mode, OperationMode::Chmod | OperationMode::None) {
                return Err(StartError::UnsupportedMode(mode));
            }
            if state.roots.is_empty() {
                return Err(StartError::NoRoots);
            }
            // Claimed before the lock is released. A previous worker serves
            // an older run and exits at its next check.
            let stale = Self::take_worker(&mut state);
            state.run += 1;
            state.mode = mode;
            state.filters = filters;
            state.ignore_links = ignore_links;
            state.counters.reset();
            state.delivered.clear();
            trace_walk!("starting {mode} over {} root(s)", state.roots.len());

            let done = self.pool.as_ref().map(|_| {
                let (sender, receiver) = crossbeam_channel::bounded(1);
                state.worker_done = Some(receiver);
                state.worker_thread = None;
                sender
            });
            (stale, done, state.run)
        };
        if let Some(stale) = stale {
            stale.join();
        }

        match (&self.pool, done) {
            (Some(pool), Some(done)) => {
                let shared = Arc::clone(&self.shared);
                pool.spawn(move || {
                    walker::run(&shared, run);
                    let _ = done.send(());
                });
            }
            _ => walker::run(&self.shared, run),
        }
        Ok(())
    }

    /// Cancels the traversal.
    ///
    /// Clears roots, pending batches and counters, then waits for a pool
    /// worker to exit. Calling this from the worker's own notification
    /// returns without waiting.
    pub fn stop(&self) {
        let worker = {
            let mut state = self.shared.lock();
            if state.mode != OperationMode::None {
                trace_walk!("stopping {}", state.mode);
            }
            state.mode = OperationMode::None;
            state.run += 1;
            state.roots.clear();
            state.counters.reset();
            state.delivered.clear();
            state.filters = ActiveFilters::none();
            Self::take_worker(&mut state)
        };
        if let Some(worker) = worker {
            worker.join();
        }
    }

    fn take_worker(state: &mut State) -> Option<WorkerHandle> {
        state.worker_done.take().map(|done| WorkerHandle {
            done,
            thread: state.worker_thread,
        })
    }

    /// Removes the oldest delivered batch.
    ///
    /// Taking the terminal batch returns the engine to idle.
    pub fn next_batch(&self) -> Option<ListingBatch> {
        let mut state = self.shared.lock();
        let batch = state.delivered.pop_front()?;
        if batch.is_terminal() {
            trace_stats!(
                "{} finished: {} files, {} directories",
                state.mode,
                state.counters.files,
                state.counters.directories
            );
            state.mode = OperationMode::None;
            state.filters = ActiveFilters::none();
        }
        Some(batch)
    }

    /// Dispatches every delivered batch to `handler`.
    ///
    /// Returns `true` once the terminal batch has been consumed, after
    /// [`LocalOperationHandler::operation_finished`] ran.
    pub fn drain<H>(&self, handler: &mut H) -> bool
    where
        H: LocalOperationHandler + ?Sized,
    {
        let mode = self.operation_mode();
        while let Some(batch) = self.next_batch() {
            if batch.is_terminal() {
                handler.operation_finished();
                return true;
            }
            handler.listing(&batch);
            if mode.is_transfer() {
                if batch.is_empty() {
                    if mode == OperationMode::Transfer {
                        handler.empty_directory(&batch.source, batch.target());
                    }
                } else {
                    for file in &batch.files {
                        handler.transfer_file(&batch.source, batch.target(), file);
                    }
                }
            }
            handler.listing_ended();
        }
        false
    }

    /// Engine configuration.
    pub fn config(&self) -> LocalTraversalConfig {
        self.shared.config
    }
}

impl RecursiveOperation for LocalRecursiveOperation {
    fn operation_mode(&self) -> OperationMode {
        self.shared.lock().mode
    }

    fn counters(&self) -> OperationCounters {
        self.shared.lock().counters
    }

    fn root_count(&self) -> usize {
        self.shared.lock().roots.len()
    }

    fn stop(&mut self) {
        Self::stop(self);
    }
}
