use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use logging::trace_filter;

use crate::{
    FilterAction, FilterEntry, FilterError, FilterPredicate, FilterRule, compiled::CompiledRule,
};

#[derive(Clone, Debug, Default)]
struct FilterSetInner {
    rules: Vec<CompiledRule>,
    base: Option<PathBuf>,
    min_size: Option<u64>,
    max_size: Option<u64>,
    excluded_attributes: u32,
    modified_after: Option<SystemTime>,
    modified_before: Option<SystemTime>,
}

/// Compiled, immutable collection of filter conditions.
///
/// A `FilterSet` combines:
///
/// - ordered include/exclude glob rules, evaluated first-match-wins (paths
///   that match no rule are included);
/// - optional size limits, applied to files with a known size;
/// - an attribute mask, excluding any entry that carries one of its bits;
/// - an optional modification-time window, applied to files with a known
///   modification time.
///
/// Globs are matched against the entry's path relative to the configured
/// [`base`](Self::with_base). Entries outside the base, or a set without a
/// base, match against the full path with its root component stripped.
///
/// `FilterSet` is cheaply cloneable (the inner state is behind an [`Arc`]).
///
/// # Examples
///
/// ```
/// use filters::{FilterRule, FilterSet};
/// use std::path::Path;
///
/// let set = FilterSet::from_rules([
///     FilterRule::include("keep.o"),
///     FilterRule::exclude("*.o"),
/// ]).unwrap();
///
/// assert!(set.allows(Path::new("keep.o"), false));
/// assert!(!set.allows(Path::new("main.o"), false));
/// assert!(set.allows(Path::new("README.md"), false));
/// ```
#[derive(Clone, Debug, Default)]
pub struct FilterSet {
    inner: Arc<FilterSetInner>,
}

impl FilterSet {
    /// Builds a [`FilterSet`] from the supplied rules.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] if any rule's pattern cannot be compiled into a
    /// valid glob matcher.
    pub fn from_rules<I>(rules: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = FilterRule>,
    {
        let rules = rules
            .into_iter()
            .map(CompiledRule::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            inner: Arc::new(FilterSetInner {
                rules,
                ..FilterSetInner::default()
            }),
        })
    }

    /// Returns `true` if the set carries no condition at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let inner = &self.inner;
        inner.rules.is_empty()
            && inner.min_size.is_none()
            && inner.max_size.is_none()
            && inner.excluded_attributes == 0
            && inner.modified_after.is_none()
            && inner.modified_before.is_none()
    }

    /// Sets the directory anchored patterns are relative to.
    #[must_use]
    pub fn with_base(self, base: impl Into<PathBuf>) -> Self {
        self.update(|inner| inner.base = Some(base.into()))
    }

    /// Excludes files smaller than `bytes`.
    #[must_use]
    pub fn with_min_size(self, bytes: u64) -> Self {
        self.update(|inner| inner.min_size = Some(bytes))
    }

    /// Excludes files larger than `bytes`.
    #[must_use]
    pub fn with_max_size(self, bytes: u64) -> Self {
        self.update(|inner| inner.max_size = Some(bytes))
    }

    /// Excludes every entry whose attributes intersect `mask`.
    #[must_use]
    pub fn with_excluded_attributes(self, mask: u32) -> Self {
        self.update(|inner| inner.excluded_attributes = mask)
    }

    /// Excludes files last modified before `time`.
    #[must_use]
    pub fn with_modified_after(self, time: SystemTime) -> Self {
        self.update(|inner| inner.modified_after = Some(time))
    }

    /// Excludes files last modified after `time`.
    #[must_use]
    pub fn with_modified_before(self, time: SystemTime) -> Self {
        self.update(|inner| inner.modified_before = Some(time))
    }

    /// Returns `true` if the glob rules keep `path`.
    ///
    /// `path` is taken as already relative to the base. `is_dir` affects
    /// directory-only rules (patterns with a trailing `/`).
    #[must_use]
    pub fn allows(&self, path: &Path, is_dir: bool) -> bool {
        self.inner
            .rules
            .iter()
            .find(|rule| rule.matches(path, is_dir))
            .is_none_or(|rule| rule.action == FilterAction::Include)
    }

    fn relative_to_base(&self, full: &Path) -> PathBuf {
        if let Some(relative) = self
            .inner
            .base
            .as_deref()
            .and_then(|base| full.strip_prefix(base).ok())
        {
            return relative.to_path_buf();
        }
        full.components()
            .filter(|component| matches!(component, Component::Normal(_)))
            .collect()
    }

    fn excluded_by_metadata(&self, entry: &FilterEntry<'_>) -> bool {
        let inner = &self.inner;
        if entry.attributes & inner.excluded_attributes != 0 {
            return true;
        }
        if entry.is_dir {
            return false;
        }
        if let Some(size) = entry.size {
            if inner.min_size.is_some_and(|min| size < min)
                || inner.max_size.is_some_and(|max| size > max)
            {
                return true;
            }
        }
        if let Some(modified) = entry.modified {
            if inner.modified_after.is_some_and(|after| modified < after)
                || inner.modified_before.is_some_and(|before| modified > before)
            {
                return true;
            }
        }
        false
    }

    fn update(mut self, apply: impl FnOnce(&mut FilterSetInner)) -> Self {
        let inner = Arc::make_mut(&mut self.inner);
        apply(inner);
        self
    }
}

impl FilterPredicate for FilterSet {
    fn filtered(&self, entry: &FilterEntry<'_>) -> bool {
        if self.is_empty() {
            return false;
        }
        if self.excluded_by_metadata(entry) {
            trace_filter!("{} excluded by size, time or attributes", entry.name);
            return true;
        }
        let relative = self.relative_to_base(&entry.full_path());
        let allowed = self.allows(&relative, entry.is_dir);
        if !allowed {
            trace_filter!("{} excluded by rule", relative.display());
        }
        !allowed
    }
}
