#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `dirops` runs recursive directory operations (list, transfer, flattened
//! transfer, delete and permission change) over local and remote trees. It
//! bundles the workspace crates behind one dependency:
//!
//! - [`recursion`]: recursion roots, directory visit requests, operation
//!   modes, counters and the [`RecursiveOperation`] trait shared by both
//!   engines;
//! - [`walk`]: the local engine, a breadth-first worker delivering capped
//!   listing batches;
//! - [`remote`]: the remote engine, a depth-first state machine that submits
//!   protocol commands and advances on their outcomes;
//! - [`filters`]: the filter predicates both engines consult;
//! - [`logging`]: tracing targets, verbosity configuration and subscriber
//!   setup.
//!
//! # Examples
//!
//! Deleting a remote tree with a command queue standing in for the protocol
//! layer:
//!
//! ```
//! use dirops::recursion::{ActiveFilters, LinkKind, OperationMode, RecursionRoot};
//! use dirops::remote::{Command, DirectoryListing, RemoteEntry, RemotePath, RemoteRecursiveOperation};
//!
//! let tree = RemotePath::parse("/srv/old").unwrap();
//! let mut root = RecursionRoot::new(tree.clone(), true);
//! root.add_dir_to_visit(RemotePath::parse("/srv").unwrap(), "old", None, true, LinkKind::NotALink);
//!
//! let mut engine = RemoteRecursiveOperation::new(Vec::new(), ());
//! engine.add_root(root);
//! engine.start(OperationMode::Delete, ActiveFilters::none()).unwrap();
//! engine.process_directory_listing(&DirectoryListing::new(tree, vec![RemoteEntry::file("a", 1)]));
//!
//! assert!(matches!(
//!     engine.sink().last(),
//!     Some(Command::RemoveDirectory { name, .. }) if name == "old"
//! ));
//! ```

pub use filters;
pub use logging;
pub use recursion;
pub use remote;
pub use walk;

pub use recursion::{ActiveFilters, OperationMode, RecursionRoot, RecursiveOperation, StartError};
pub use remote::RemoteRecursiveOperation;
pub use walk::LocalRecursiveOperation;
