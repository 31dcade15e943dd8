use std::fmt;

/// Server a remote operation runs against.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Site {
    /// Host name or address.
    pub host: String,
    /// Port number.
    pub port: u16,
    /// Login name, if any.
    pub user: Option<String>,
}

impl Site {
    /// Creates a site without a login name.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            user: None,
        }
    }

    /// Sets the login name.
    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(user) = &self.user {
            write!(f, "{user}@")?;
        }
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Site::new("example.org", 21).to_string(), "example.org:21");
        assert_eq!(
            Site::new("example.org", 22).with_user("me").to_string(),
            "me@example.org:22"
        );
    }
}
