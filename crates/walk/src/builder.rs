use std::sync::Arc;

use rayon::ThreadPool;

use crate::{BatchNotifier, LocalRecursiveOperation, LocalTraversalConfig};

/// Configures a [`LocalRecursiveOperation`].
///
/// Without a [`pool`](Self::pool) the engine scans on the thread that calls
/// [`start`](LocalRecursiveOperation::start). Without a
/// [`notifier`](Self::notifier) the consumer has to poll
/// [`next_batch`](LocalRecursiveOperation::next_batch).
#[derive(Default)]
pub struct LocalTraversalBuilder {
    config: LocalTraversalConfig,
    pool: Option<Arc<ThreadPool>>,
    notifier: Option<Box<dyn BatchNotifier>>,
}

impl LocalTraversalBuilder {
    /// Creates a builder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn config(mut self, config: LocalTraversalConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the worker on `pool`.
    #[must_use]
    pub fn pool(mut self, pool: Arc<ThreadPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Sets the callback run when batches become available.
    #[must_use]
    pub fn notifier(mut self, notifier: impl BatchNotifier + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    /// Builds the engine.
    #[must_use]
    pub fn build(self) -> LocalRecursiveOperation {
        let notifier: Box<dyn BatchNotifier> = match self.notifier {
            Some(notifier) => notifier,
            None => Box::new(|| {}),
        };
        LocalRecursiveOperation::from_parts(notifier, self.config, self.pool)
    }
}
