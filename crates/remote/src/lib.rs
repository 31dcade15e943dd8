#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `remote` is the traversal engine for directory trees reached through a
//! command-based protocol. [`RemoteRecursiveOperation`] does no I/O of its
//! own: it submits [`Command`]s to a [`CommandSink`] and is re-entered when
//! the protocol layer reports how the outstanding listing went.
//!
//! # Design
//!
//! - Roots and visit requests come from the shared `recursion` crate,
//!   expressed in [`RemotePath`]s.
//! - Each entry point ([`RemoteRecursiveOperation::process_directory_listing`],
//!   [`RemoteRecursiveOperation::listing_failed`],
//!   [`RemoteRecursiveOperation::link_is_not_dir`]) finishes by submitting
//!   the next command. [`RemoteEvent`] bundles the three outcomes for
//!   callers that prefer a single [`RemoteRecursiveOperation::handle_event`].
//! - Consumer notifications go through [`RemoteOperationHandler`];
//!   permission changes are computed by a [`PermissionConverter`] such as
//!   [`ModeChange`].
//!
//! # Invariants
//!
//! - At most one [`Command::List`] is outstanding. Remove and chmod
//!   commands are submitted without waiting.
//! - Subtrees are listed depth-first, in listing order.
//! - In delete mode the files of a directory are removed before the
//!   directory, and a directory before its parent.
//! - A transient listing failure is retried once; a critical one is not.
//!
//! # Examples
//!
//! ```
//! use recursion::{ActiveFilters, LinkKind, OperationMode, RecursionRoot};
//! use remote::{Command, DirectoryListing, RemoteEntry, RemotePath, RemoteRecursiveOperation};
//!
//! let start = RemotePath::parse("/srv").unwrap();
//! let mut root = RecursionRoot::new(start.clone(), false);
//! root.add_dir_to_visit(start.clone(), "", None, true, LinkKind::NotALink);
//!
//! let mut engine = RemoteRecursiveOperation::new(Vec::<Command>::new(), ());
//! engine.add_root(root);
//! engine.start(OperationMode::Delete, ActiveFilters::none()).unwrap();
//! assert!(engine.sink()[0].is_list());
//!
//! engine.process_directory_listing(&DirectoryListing::new(
//!     start.clone(),
//!     vec![RemoteEntry::file("old.log", 10)],
//! ));
//! assert_eq!(
//!     engine.sink()[1],
//!     Command::RemoveFiles { path: start, names: vec!["old.log".into()] }
//! );
//! ```

mod chmod;
mod command;
mod engine;
mod event;
mod handler;
mod listing;
mod path;
mod site;

pub use chmod::{ApplyScope, ModeChange, ModeChangeError, PermissionConverter, parse_listed_permissions};
pub use command::{Command, CommandSink};
pub use engine::RemoteRecursiveOperation;
pub use event::RemoteEvent;
pub use handler::RemoteOperationHandler;
pub use listing::{DirectoryListing, ListingFailure, RemoteEntry};
pub use path::{RemotePath, RemotePathError};
pub use site::Site;
