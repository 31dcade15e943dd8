#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `recursion` holds the model both directory engines share: a
//! [`RecursionRoot`] is one top-level traversal task owning a queue of
//! [`DirectoryVisit`] requests and a visited set, and [`RecursiveOperation`]
//! is the capability (mode, counters, cancellation) each engine exposes.
//!
//! # Design
//!
//! The queue model is generic over [`TraversalPath`] so the local engine can
//! queue [`PathBuf`](std::path::PathBuf)s while the remote engine queues its
//! server paths. Post-order work is a tagged request
//! ([`VisitKind::RemoveAfterContents`]) placed in the same queue rather than
//! a separate stack.
//!
//! # Invariants
//!
//! - A root is empty when its queue is empty or its start path is empty.
//!   Engines drop empty roots.
//! - A root records each enumerated path once; later visits of the same path
//!   are skipped.
//!
//! # Examples
//!
//! ```
//! use recursion::{LinkKind, RecursionRoot};
//! use std::path::PathBuf;
//!
//! let mut root = RecursionRoot::new(PathBuf::from("/srv/data"), false);
//! assert!(root.is_empty());
//!
//! root.add_dir_to_visit(PathBuf::from("/srv/data"), "", None, true, LinkKind::NotALink);
//! assert_eq!(root.pending_len(), 1);
//! assert!(root.mark_visited(PathBuf::from("/srv/data")));
//! assert!(!root.mark_visited(PathBuf::from("/srv/data")));
//! ```

mod active;
mod counters;
mod error;
mod mode;
mod operation;
mod path;
mod root;
mod sanitize;
mod visit;

pub use active::ActiveFilters;
pub use counters::OperationCounters;
pub use error::StartError;
pub use mode::OperationMode;
pub use operation::RecursiveOperation;
pub use path::TraversalPath;
pub use root::RecursionRoot;
pub use sanitize::sanitize_name;
pub use visit::{DirectoryVisit, LinkKind, VisitKind};
