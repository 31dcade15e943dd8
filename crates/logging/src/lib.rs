#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` provides the diagnostics plumbing shared by the recursive
//! operation engines. Every subsystem emits through a fixed tracing target
//! (`dirops::walk`, `dirops::remote`, ...) via the macros exported here, and a
//! [`VerbosityConfig`] decides which targets are visible.
//!
//! # Design
//!
//! - [`InfoFlag`] and [`DebugFlag`] name the categories a user can raise,
//!   mirroring the `--info`/`--debug` flag lists of command line tools.
//! - [`VerbosityConfig`] stores one level per flag. It can be built from a
//!   plain verbose level and refined with flag tokens such as `walk2`.
//! - [`VerbosityConfig::env_filter`] renders the configuration as a
//!   [`tracing_subscriber::EnvFilter`]; [`init_tracing`] installs it globally.
//!
//! # Examples
//!
//! ```
//! use logging::VerbosityConfig;
//!
//! let mut config = VerbosityConfig::from_verbose_level(1);
//! config.apply_debug_list("walk2,filter").unwrap();
//! assert!(config.directives().contains("dirops::walk=trace"));
//! ```

mod config;
mod levels;
mod tracing_bridge;
mod tracing_macros;

pub use config::VerbosityConfig;
pub use levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};
pub use tracing_bridge::{init_tracing, targets};
