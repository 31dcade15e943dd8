//! Local engine runs over real temporary trees.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use dirops::filters::{FilterRule, FilterSet, NoFilter};
use dirops::recursion::{ActiveFilters, LinkKind, OperationMode, RecursionRoot, RecursiveOperation};
use dirops::walk::{
    DEFAULT_BATCH_CAPACITY, ListingBatch, ListingEntry, LocalOperationHandler,
    LocalRecursiveOperation, LocalTraversalBuilder,
};
use test_support::TestTree;

fn root_for(path: &Path, target: Option<PathBuf>) -> RecursionRoot<PathBuf> {
    let mut root = RecursionRoot::new(path.to_path_buf(), false);
    root.add_dir_to_visit(path.to_path_buf(), "", target, true, LinkKind::NotALink);
    root
}

fn pool() -> Arc<rayon::ThreadPool> {
    Arc::new(
        rayon::ThreadPoolBuilder::new()
            .num_threads(2)
            .build()
            .expect("thread pool"),
    )
}

/// Collects batches from a pooled engine, waking on each notification,
/// until the terminal batch arrives.
fn collect_pooled(
    engine: &LocalRecursiveOperation,
    wakeups: &crossbeam_channel::Receiver<()>,
) -> Vec<ListingBatch> {
    let mut batches = Vec::new();
    loop {
        while let Some(batch) = engine.next_batch() {
            let terminal = batch.is_terminal();
            batches.push(batch);
            if terminal {
                return batches;
            }
        }
        wakeups
            .recv_timeout(Duration::from_secs(30))
            .expect("notification before timeout");
    }
}

#[test]
fn large_directory_arrives_in_capped_batches() {
    let tree = TestTree::new();
    tree.populate("big", "file", 12_000);

    let (wake, wakeups) = crossbeam_channel::unbounded();
    let engine = LocalTraversalBuilder::new()
        .pool(pool())
        .notifier(move || {
            let _ = wake.send(());
        })
        .build();
    assert_eq!(engine.config().batch_capacity, DEFAULT_BATCH_CAPACITY);

    engine.add_root(root_for(&tree.path("big"), None));
    engine
        .start(OperationMode::List, ActiveFilters::none(), false)
        .expect("start");
    let batches = collect_pooled(&engine, &wakeups);

    let sizes: Vec<_> = batches.iter().map(ListingBatch::len).collect();
    assert_eq!(sizes, [5000, 5000, 2000, 0]);
    assert_eq!(batches.iter().filter(|batch| batch.is_terminal()).count(), 1);
    assert!(batches[..3].iter().all(|batch| batch.source == tree.path("big")));
    assert_eq!(engine.counters().files, 12_000);
    assert!(!engine.is_active());
}

#[derive(Default)]
struct Mirror {
    copies: Vec<(PathBuf, PathBuf)>,
    empty: Vec<Option<PathBuf>>,
    finished: bool,
}

impl LocalOperationHandler for Mirror {
    fn transfer_file(&mut self, source_dir: &Path, target_dir: Option<&Path>, entry: &ListingEntry) {
        if let Some(target) = target_dir {
            self.copies
                .push((source_dir.join(&entry.name), target.join(&entry.name)));
        }
    }

    fn empty_directory(&mut self, _source_dir: &Path, target_dir: Option<&Path>) {
        self.empty.push(target_dir.map(Path::to_path_buf));
    }

    fn operation_finished(&mut self) {
        self.finished = true;
    }
}

#[test]
fn upload_maps_every_file_to_its_target() {
    let tree = TestTree::new();
    tree.write("project/Cargo.toml", "[package]")
        .write("project/src/lib.rs", "")
        .write("project/target/debug/out", "")
        .mkdir("project/docs");

    let filters = FilterSet::from_rules([FilterRule::exclude("target/")])
        .expect("filters")
        .with_base(tree.path("project"));
    let engine = LocalTraversalBuilder::new().build();
    engine.add_root(root_for(&tree.path("project"), Some(PathBuf::from("/remote/project"))));
    engine
        .start(OperationMode::Transfer, ActiveFilters::new(filters, NoFilter), false)
        .expect("start");

    let mut mirror = Mirror::default();
    assert!(engine.drain(&mut mirror));
    assert!(!engine.is_active());

    let mut copies = mirror.copies.clone();
    copies.sort();
    assert_eq!(
        copies,
        [
            (
                tree.path("project/Cargo.toml"),
                PathBuf::from("/remote/project/Cargo.toml")
            ),
            (
                tree.path("project/src/lib.rs"),
                PathBuf::from("/remote/project/src/lib.rs")
            ),
        ]
    );
    assert_eq!(mirror.empty, [Some(PathBuf::from("/remote/project/docs"))]);
    assert!(mirror.finished);
}

#[test]
fn engines_share_the_operation_interface() {
    let tree = TestTree::new();
    tree.populate("dir", "f", 3);

    let local = LocalTraversalBuilder::new().build();
    local.add_root(root_for(&tree.path("dir"), None));
    local
        .start(OperationMode::List, ActiveFilters::none(), false)
        .expect("start");

    let mut remote = dirops::RemoteRecursiveOperation::new(Vec::new(), ());
    let mut remote_root = RecursionRoot::new(
        dirops::remote::RemotePath::parse("/dir").expect("path"),
        false,
    );
    remote_root.add_dir_to_visit(
        dirops::remote::RemotePath::parse("/dir").expect("path"),
        "",
        None,
        true,
        LinkKind::NotALink,
    );
    remote.add_root(remote_root);
    remote
        .start(OperationMode::Delete, ActiveFilters::none())
        .expect("start");

    let mut operations: Vec<Box<dyn RecursiveOperation>> = vec![Box::new(local), Box::new(remote)];
    let modes: Vec<_> = operations.iter().map(|op| op.operation_mode()).collect();
    assert_eq!(modes, [OperationMode::List, OperationMode::Delete]);
    assert!(operations.iter().all(|op| op.is_active()));

    for operation in &mut operations {
        operation.stop();
    }
    assert!(operations.iter().all(|op| !op.is_active()));
    assert!(operations.iter().all(|op| op.root_count() == 0));
}
