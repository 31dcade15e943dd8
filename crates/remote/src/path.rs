use std::fmt;
use std::str::FromStr;

use recursion::TraversalPath;

/// Reasons a string is not a valid [`RemotePath`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum RemotePathError {
    /// The string was empty.
    #[error("remote path is empty")]
    Empty,
    /// The string did not start with `/`.
    #[error("remote path '{0}' is not absolute")]
    Relative(String),
    /// The string contained a `..` segment.
    #[error("remote path '{0}' contains a parent segment")]
    ParentSegment(String),
}

/// Absolute, normalized server-side path using `/` separators.
///
/// The default value is the empty path, which names no directory.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RemotePath(String);

impl RemotePath {
    /// The server root, `/`.
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_owned())
    }

    /// Parses an absolute path, collapsing repeated separators and `.`
    /// segments.
    pub fn parse(text: &str) -> Result<Self, RemotePathError> {
        if text.is_empty() {
            return Err(RemotePathError::Empty);
        }
        if !text.starts_with('/') {
            return Err(RemotePathError::Relative(text.to_owned()));
        }

        let mut normalized = String::with_capacity(text.len());
        for segment in text.split('/').filter(|s| !s.is_empty() && *s != ".") {
            if segment == ".." {
                return Err(RemotePathError::ParentSegment(text.to_owned()));
            }
            normalized.push('/');
            normalized.push_str(segment);
        }
        if normalized.is_empty() {
            normalized.push('/');
        }
        Ok(Self(normalized))
    }

    /// Path as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for `/`.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Last segment, `None` for the root and the empty path.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        self.0.rsplit('/').next().filter(|name| !name.is_empty())
    }
}

impl TraversalPath for RemotePath {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn join_name(&self, name: &str) -> Self {
        if name.is_empty() || self.0.is_empty() {
            return self.clone();
        }
        if self.is_root() {
            Self(format!("/{name}"))
        } else {
            Self(format!("{}/{name}", self.0))
        }
    }

    fn parent_dir(&self) -> Option<Self> {
        if self.0.is_empty() || self.is_root() {
            return None;
        }
        match self.0.rfind('/') {
            Some(0) => Some(Self::root()),
            Some(index) => Some(Self(self.0[..index].to_owned())),
            None => None,
        }
    }

    fn is_ancestor_of(&self, other: &Self) -> bool {
        if self.0.is_empty() || other.0.len() <= self.0.len() {
            return false;
        }
        if self.is_root() {
            return other.0.starts_with('/');
        }
        other.0.starts_with(&self.0) && other.0.as_bytes()[self.0.len()] == b'/'
    }
}

impl FromStr for RemotePath {
    type Err = RemotePathError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
