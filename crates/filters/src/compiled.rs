use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};

use crate::{FilterAction, FilterError, FilterRule};

/// Glob matchers derived from one [`FilterRule`].
#[derive(Clone, Debug)]
pub(crate) struct CompiledRule {
    pub(crate) action: FilterAction,
    /// Matches the path itself.
    direct: GlobMatcher,
    /// Matches paths below a directory-only rule.
    descendants: Option<GlobMatcher>,
    directory_only: bool,
}

impl CompiledRule {
    pub(crate) fn new(rule: FilterRule) -> Result<Self, FilterError> {
        let directory_only = rule.is_directory_only();
        let anchored = rule.is_anchored();

        let mut core = rule.pattern.as_str();
        if anchored {
            core = core.trim_start_matches('/');
        }
        if directory_only {
            core = core.trim_end_matches('/');
        }

        let base = if anchored {
            core.to_owned()
        } else {
            format!("**/{core}")
        };

        let direct = compile(&rule, &base)?;
        let descendants = if directory_only {
            Some(compile(&rule, &format!("{base}/**"))?)
        } else {
            None
        };

        Ok(Self {
            action: rule.action,
            direct,
            descendants,
            directory_only,
        })
    }

    pub(crate) fn matches(&self, path: &Path, is_dir: bool) -> bool {
        if self
            .descendants
            .as_ref()
            .is_some_and(|matcher| matcher.is_match(path))
        {
            return true;
        }
        if self.directory_only && !is_dir {
            return false;
        }
        self.direct.is_match(path)
    }
}

fn compile(rule: &FilterRule, expression: &str) -> Result<GlobMatcher, FilterError> {
    GlobBuilder::new(expression)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|error| FilterError::new(rule.pattern.clone(), rule.action, error))
}
