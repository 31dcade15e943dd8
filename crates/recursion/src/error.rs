use crate::OperationMode;

/// Reasons an engine refuses to start.
///
/// A refused start leaves the engine idle with its roots and counters
/// untouched.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum StartError {
    /// The engine is already running an operation.
    #[error("a recursive operation is already active")]
    AlreadyActive,
    /// The engine cannot perform the requested mode.
    #[error("{0} is not supported by this engine")]
    UnsupportedMode(OperationMode),
    /// `chmod` was requested without permission-change data.
    #[error("chmod requires permission data")]
    MissingChmodData,
    /// No non-empty recursion root has been added.
    #[error("no recursion roots queued")]
    NoRoots,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            StartError::UnsupportedMode(OperationMode::Chmod).to_string(),
            "chmod is not supported by this engine"
        );
        assert_eq!(StartError::NoRoots.to_string(), "no recursion roots queued");
    }
}
