use std::fmt;

/// Operation a recursive engine performs on every qualifying entry.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum OperationMode {
    /// Idle.
    #[default]
    None,
    /// Transfer files, mirroring the directory structure locally.
    Transfer,
    /// Transfer files into a single local directory.
    TransferFlatten,
    /// Delete files, then their directories in post-order.
    Delete,
    /// Change permissions. Only the remote engine supports this mode.
    Chmod,
    /// Enumerate without acting on entries.
    List,
}

impl OperationMode {
    /// Returns `true` for both transfer variants.
    #[must_use]
    pub const fn is_transfer(self) -> bool {
        matches!(self, Self::Transfer | Self::TransferFlatten)
    }

    /// Returns `true` when nested directories are not mirrored locally.
    #[must_use]
    pub const fn is_flatten(self) -> bool {
        matches!(self, Self::TransferFlatten)
    }

    /// Returns the lowercase name used in log output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Transfer => "transfer",
            Self::TransferFlatten => "transfer-flatten",
            Self::Delete => "delete",
            Self::Chmod => "chmod",
            Self::List => "list",
        }
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_variants() {
        assert!(OperationMode::Transfer.is_transfer());
        assert!(OperationMode::TransferFlatten.is_transfer());
        assert!(!OperationMode::Delete.is_transfer());
        assert!(OperationMode::TransferFlatten.is_flatten());
        assert!(!OperationMode::Transfer.is_flatten());
    }

    #[test]
    fn default_is_idle() {
        assert_eq!(OperationMode::default(), OperationMode::None);
        assert_eq!(OperationMode::TransferFlatten.to_string(), "transfer-flatten");
    }
}
