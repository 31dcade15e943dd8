use crate::FilterAction;

/// User-visible filter rule consisting of an action and pattern.
///
/// Pattern syntax:
///
/// - a leading `/` anchors the pattern to the filter base;
/// - a trailing `/` restricts the rule to directories and everything below
///   them;
/// - anything else matches at any depth.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FilterRule {
    pub(crate) action: FilterAction,
    pub(crate) pattern: String,
}

impl FilterRule {
    /// Creates an include rule for `pattern`.
    #[must_use]
    pub fn include(pattern: impl Into<String>) -> Self {
        Self {
            action: FilterAction::Include,
            pattern: pattern.into(),
        }
    }

    /// Creates an exclude rule for `pattern`.
    #[must_use]
    pub fn exclude(pattern: impl Into<String>) -> Self {
        Self {
            action: FilterAction::Exclude,
            pattern: pattern.into(),
        }
    }

    /// Returns the rule action.
    #[must_use]
    pub const fn action(&self) -> FilterAction {
        self.action
    }

    /// Returns the pattern text associated with the rule.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns whether the pattern is anchored to the filter base.
    #[must_use]
    pub fn is_anchored(&self) -> bool {
        self.pattern.starts_with('/')
    }

    /// Returns whether the rule only applies to directories.
    #[must_use]
    pub fn is_directory_only(&self) -> bool {
        self.pattern.len() > 1 && self.pattern.ends_with('/')
    }

    /// Anchors the pattern to the filter base if it is not already.
    #[must_use]
    pub fn anchor_to_root(mut self) -> Self {
        if !self.pattern.starts_with('/') {
            self.pattern.insert(0, '/');
        }
        self
    }
}
