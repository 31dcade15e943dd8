use std::fmt;
use std::sync::Arc;

use filters::{FilterPredicate, NoFilter};

/// The pair of filter predicates an operation is started with.
///
/// Local entries are tested against [`local`](Self::local), remote ones
/// against [`remote`](Self::remote).
#[derive(Clone)]
pub struct ActiveFilters {
    /// Applied to entries of the local filesystem.
    pub local: Arc<dyn FilterPredicate>,
    /// Applied to entries of remote listings.
    pub remote: Arc<dyn FilterPredicate>,
}

impl ActiveFilters {
    /// Creates a filter pair.
    pub fn new(
        local: impl FilterPredicate + 'static,
        remote: impl FilterPredicate + 'static,
    ) -> Self {
        Self {
            local: Arc::new(local),
            remote: Arc::new(remote),
        }
    }

    /// Filters that keep every entry.
    #[must_use]
    pub fn none() -> Self {
        Self::new(NoFilter, NoFilter)
    }
}

impl Default for ActiveFilters {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for ActiveFilters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveFilters").finish_non_exhaustive()
    }
}
