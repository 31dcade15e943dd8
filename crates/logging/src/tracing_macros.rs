//! crates/logging/src/tracing_macros.rs
//! Convenience macros for subsystem-scoped tracing.
//!
//! These macros wrap the standard tracing macros with the targets listed in
//! [`crate::targets`], so [`crate::VerbosityConfig::env_filter`] can switch
//! each subsystem on independently. Callers must depend on `tracing`.

/// Emit a local scan trace.
///
/// # Example
/// ```ignore
/// trace_walk!("scanning {}", path.display());
/// ```
#[macro_export]
macro_rules! trace_walk {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "dirops::walk", $($arg)*);
    };
}

/// Emit a remote state machine trace.
///
/// # Example
/// ```ignore
/// trace_remote!("listing {}", path);
/// ```
#[macro_export]
macro_rules! trace_remote {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "dirops::remote", $($arg)*);
    };
}

/// Emit a pending-queue trace.
#[macro_export]
macro_rules! trace_queue {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "dirops::queue", $($arg)*);
    };
}

/// Emit a cycle-guard trace for a directory reached twice.
#[macro_export]
macro_rules! trace_dup {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "dirops::dup", $($arg)*);
    };
}

/// Emit a filter decision trace.
#[macro_export]
macro_rules! trace_filter {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "dirops::filter", $($arg)*);
    };
}

/// Emit a command submission trace.
///
/// # Example
/// ```ignore
/// trace_cmd!("submitting {:?}", command);
/// ```
#[macro_export]
macro_rules! trace_cmd {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "dirops::cmd", $($arg)*);
    };
}

/// Emit a deletion trace.
#[macro_export]
macro_rules! trace_del {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "dirops::delete", $($arg)*);
    };
}

/// Emit a permission change trace.
#[macro_export]
macro_rules! trace_chmod {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "dirops::chmod", $($arg)*);
    };
}

/// Emit a transfer hand-off trace.
#[macro_export]
macro_rules! trace_transfer {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "dirops::transfer", $($arg)*);
    };
}

/// Emit a statistics trace.
///
/// # Example
/// ```ignore
/// trace_stats!("processed {} files", count);
/// ```
#[macro_export]
macro_rules! trace_stats {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "dirops::stats", $($arg)*);
    };
}
