#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` is the local traversal engine. A [`LocalRecursiveOperation`]
//! walks one or more [`RecursionRoot`](recursion::RecursionRoot)s on the
//! local filesystem, applies the local filter predicate to every entry and
//! hands the survivors to a consumer as [`ListingBatch`]es.
//!
//! # Design
//!
//! - A single worker owns the traversal. It runs on a [`rayon`] pool when
//!   one is configured through [`LocalTraversalBuilder::pool`], otherwise
//!   inline in [`LocalRecursiveOperation::start`].
//! - Directory scans and consumer notifications run without the engine's
//!   lock held; queue mutation and cancellation checks run with it.
//! - Delivered batches queue up inside the engine. The [`BatchNotifier`]
//!   fires only when that queue goes from empty to non-empty.
//! - [`LocalRecursiveOperation::drain`] turns batches into
//!   [`LocalOperationHandler`] callbacks for callers that do not need the
//!   raw batches.
//!
//! # Invariants
//!
//! - Within a root, directories are scanned breadth-first; roots are
//!   processed in the order they were added.
//! - A batch never holds more than
//!   [`LocalTraversalConfig::batch_capacity`] entries. A directory that
//!   fills batches exactly is not followed by an extra empty batch.
//! - Each directory is scanned at most once per root, keyed by its
//!   canonical path, so links back to an ancestor terminate.
//! - Exactly one terminal batch ends a completed traversal. A cancelled
//!   traversal ends without one.
//!
//! # Errors
//!
//! [`LocalRecursiveOperation::start`] reports
//! [`StartError`](recursion::StartError). Unreadable directories are not
//! errors: they are delivered as empty listings.
//!
//! # Examples
//!
//! ```
//! use recursion::{ActiveFilters, LinkKind, OperationMode, RecursionRoot};
//! use walk::LocalTraversalBuilder;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! std::fs::create_dir(temp.path().join("nested"))?;
//! std::fs::write(temp.path().join("nested/file.txt"), b"data")?;
//!
//! let engine = LocalTraversalBuilder::new().build();
//! let mut root = RecursionRoot::new(temp.path().to_path_buf(), false);
//! root.add_dir_to_visit(temp.path().to_path_buf(), "", None, true, LinkKind::NotALink);
//! engine.add_root(root);
//! engine.start(OperationMode::List, ActiveFilters::none(), false)?;
//!
//! let mut files = Vec::new();
//! while let Some(batch) = engine.next_batch() {
//!     files.extend(batch.files.into_iter().map(|entry| entry.name));
//! }
//! assert_eq!(files, ["file.txt"]);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod batch;
mod builder;
mod config;
mod engine;
mod entry;
mod handler;
mod walker;

pub use batch::ListingBatch;
pub use builder::LocalTraversalBuilder;
pub use config::{DEFAULT_BATCH_CAPACITY, LocalTraversalConfig};
pub use engine::LocalRecursiveOperation;
pub use entry::ListingEntry;
pub use handler::{BatchNotifier, LocalOperationHandler};
