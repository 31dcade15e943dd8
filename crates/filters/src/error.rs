use crate::FilterAction;

/// A filter rule whose pattern could not be turned into a glob matcher.
#[derive(Debug, thiserror::Error)]
#[error("invalid {action} pattern '{pattern}': {source}")]
pub struct FilterError {
    pattern: String,
    action: FilterAction,
    #[source]
    source: globset::Error,
}

impl FilterError {
    pub(crate) const fn new(pattern: String, action: FilterAction, source: globset::Error) -> Self {
        Self {
            pattern,
            action,
            source,
        }
    }

    /// Pattern as written in the rule.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Action of the rejected rule.
    #[must_use]
    pub const fn action(&self) -> FilterAction {
        self.action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use globset::GlobBuilder;
    use std::error::Error as _;

    #[test]
    fn message_names_action_and_pattern() {
        let glob_err = GlobBuilder::new("a[").build().unwrap_err();
        let error = FilterError::new("a[".into(), FilterAction::Exclude, glob_err);

        assert_eq!(error.pattern(), "a[");
        assert_eq!(error.action(), FilterAction::Exclude);
        assert!(error.to_string().starts_with("invalid exclude pattern 'a['"));
        assert!(error.source().is_some());
    }
}
