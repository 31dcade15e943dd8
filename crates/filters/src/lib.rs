#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `filters` decides, per directory entry, whether a recursive operation skips
//! it. The engines only see the [`FilterPredicate`] trait: they describe each
//! entry with a [`FilterEntry`] (name, containing directory, directory flag,
//! size, attribute bits, modification time) and drop it when the predicate
//! answers `true`.
//!
//! # Design
//!
//! - [`FilterRule`] captures an include/exclude action and a glob pattern.
//! - [`FilterSet`] owns the compiled representation of each rule plus the
//!   optional size, attribute and modification-time conditions, and
//!   implements [`FilterPredicate`].
//! - Closures `Fn(&FilterEntry) -> bool` implement [`FilterPredicate`] too, so
//!   callers with their own filter engine can plug it in directly.
//!
//! # Invariants
//!
//! - Rules are applied in definition order; the first matching rule wins and
//!   paths that match no rule are kept.
//! - Trailing `/` marks a directory-only rule; descendants of a matching
//!   directory match as well.
//! - Leading `/` anchors a rule to the set's base directory. Patterns without
//!   a leading slash match at any depth.
//! - Size and time conditions never exclude directories.
//!
//! # Errors
//!
//! [`FilterSet::from_rules`] reports [`FilterError`] when a rule expands to an
//! invalid glob expression.
//!
//! # Examples
//!
//! ```
//! use filters::{FilterEntry, FilterPredicate, FilterRule, FilterSet};
//! use std::path::Path;
//!
//! let filters = FilterSet::from_rules([FilterRule::exclude("*.swp")])
//!     .expect("filters compile")
//!     .with_max_size(1024);
//!
//! let entry = FilterEntry {
//!     name: "notes.swp",
//!     path: Path::new("/home/me"),
//!     is_dir: false,
//!     size: Some(10),
//!     attributes: 0,
//!     modified: None,
//! };
//! assert!(filters.filtered(&entry));
//! ```

mod action;
mod compiled;
mod error;
mod predicate;
mod rule;
mod set;

pub use action::FilterAction;
pub use error::FilterError;
pub use predicate::{FilterEntry, FilterPredicate, NoFilter};
pub use rule::FilterRule;
pub use set::FilterSet;
