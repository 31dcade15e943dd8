//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the verbosity flag system.
//!
//! Every subsystem logs under one fixed target (see [`targets`]). A
//! [`VerbosityConfig`] is translated into an [`EnvFilter`] that enables each
//! target at the level implied by its info and debug flags:
//!
//! | flags                    | level   |
//! |--------------------------|---------|
//! | debug >= 2               | `TRACE` |
//! | debug == 1               | `DEBUG` |
//! | info >= 1                | `INFO`  |
//! | otherwise                | `WARN`  |

use super::config::VerbosityConfig;
use super::levels::{DebugFlag, InfoFlag};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Tracing targets used by the workspace macros.
pub mod targets {
    /// Local directory scans.
    pub const WALK: &str = "dirops::walk";
    /// Remote state machine.
    pub const REMOTE: &str = "dirops::remote";
    /// Pending-visit queue.
    pub const QUEUE: &str = "dirops::queue";
    /// Cycle-guard hits.
    pub const DUP: &str = "dirops::dup";
    /// Filter decisions.
    pub const FILTER: &str = "dirops::filter";
    /// Remote command submission.
    pub const CMD: &str = "dirops::cmd";
    /// Removals.
    pub const DELETE: &str = "dirops::delete";
    /// Permission changes.
    pub const CHMOD: &str = "dirops::chmod";
    /// Transfer hand-off.
    pub const TRANSFER: &str = "dirops::transfer";
    /// Counters.
    pub const STATS: &str = "dirops::stats";
}

const TARGET_FLAGS: [(&str, Option<InfoFlag>, Option<DebugFlag>); 10] = [
    (targets::WALK, Some(InfoFlag::Listing), Some(DebugFlag::Walk)),
    (targets::REMOTE, Some(InfoFlag::Listing), Some(DebugFlag::Remote)),
    (targets::QUEUE, None, Some(DebugFlag::Queue)),
    (targets::DUP, None, Some(DebugFlag::Dup)),
    (targets::FILTER, None, Some(DebugFlag::Filter)),
    (targets::CMD, None, Some(DebugFlag::Cmd)),
    (targets::DELETE, Some(InfoFlag::Delete), Some(DebugFlag::Del)),
    (targets::CHMOD, Some(InfoFlag::Chmod), None),
    (targets::TRANSFER, Some(InfoFlag::Transfer), None),
    (targets::STATS, Some(InfoFlag::Stats), None),
];

impl VerbosityConfig {
    /// Returns the most verbose level enabled for `target`.
    ///
    /// Targets outside the workspace map to `WARN`.
    pub fn level_for_target(&self, target: &str) -> LevelFilter {
        let Some((_, info, debug)) = TARGET_FLAGS
            .iter()
            .find(|(name, _, _)| target == *name || target.starts_with(&format!("{name}::")))
        else {
            return LevelFilter::WARN;
        };

        let debug_level = debug.map_or(0, |flag| self.debug.get(flag));
        let info_level = info.map_or(0, |flag| self.info.get(flag));

        match (debug_level, info_level) {
            (2.., _) => LevelFilter::TRACE,
            (1, _) => LevelFilter::DEBUG,
            (0, 1..) => LevelFilter::INFO,
            (0, 0) => LevelFilter::WARN,
        }
    }

    /// Renders the configuration as `EnvFilter` directives.
    pub fn directives(&self) -> String {
        let mut directives = vec!["warn".to_owned()];
        for (target, _, _) in TARGET_FLAGS {
            let level = self.level_for_target(target);
            if level != LevelFilter::WARN {
                directives.push(format!("{target}={level}"));
            }
        }
        directives.join(",")
    }

    /// Builds an [`EnvFilter`] enabling each subsystem target per its flags.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::new(self.directives())
    }
}

/// Installs a global fmt subscriber filtered by `config`.
///
/// `RUST_LOG`, when set and valid, takes precedence over `config`. Returns
/// `false` when a global subscriber was already installed.
pub fn init_tracing(config: &VerbosityConfig) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| config.env_filter());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
