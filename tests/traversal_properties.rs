//! Property tests over randomly shaped trees.

mod support;

use std::collections::BTreeSet;

use dirops::filters::{FilterEntry, NoFilter};
use dirops::recursion::{
    ActiveFilters, LinkKind, OperationMode, RecursionRoot, RecursiveOperation, TraversalPath,
};
use dirops::remote::{Command, RemoteEntry, RemoteRecursiveOperation};
use dirops::walk::LocalTraversalBuilder;
use proptest::prelude::*;
use support::{MemoryServer, path};
use test_support::TestTree;

/// Tree shape: entry `k` goes into the directory chosen by `parent % dirs`
/// among the directories created so far.
fn shapes() -> impl Strategy<Value = Vec<(usize, bool)>> {
    prop::collection::vec((0usize..16, any::<bool>()), 0..40)
}

/// Builds the shape under `/top` and returns the server plus every
/// directory path in creation order.
fn remote_tree(shape: &[(usize, bool)]) -> (MemoryServer, Vec<String>) {
    let mut server = MemoryServer::new();
    let mut dirs = vec![server.mkdir("/", "top")];
    for (index, &(parent, is_dir)) in shape.iter().enumerate() {
        let parent = dirs[parent % dirs.len()].clone();
        let name = format!("n{index}");
        if is_dir {
            dirs.push(server.mkdir(&parent, &name));
        } else {
            server.touch(&parent, &name);
        }
    }
    (server, dirs)
}

/// Pre-order listing of `dir`, children in listed order.
fn preorder(server: &MemoryServer, dir: &str, out: &mut Vec<String>) {
    out.push(dir.to_owned());
    for entry in &server.dirs[dir] {
        if entry.is_dir {
            preorder(server, &path(dir).join_name(&entry.name).to_string(), out);
        }
    }
}

fn top_root() -> RecursionRoot<dirops::remote::RemotePath> {
    let mut root = RecursionRoot::new(path("/top"), true);
    root.add_dir_to_visit(path("/"), "top", None, true, LinkKind::NotALink);
    root
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn remote_listing_is_depth_first_preorder(shape in shapes()) {
        let (mut server, dirs) = remote_tree(&shape);
        let mut expected = Vec::new();
        preorder(&server, "/top", &mut expected);

        let (sender, commands) = crossbeam_channel::unbounded();
        let mut engine = RemoteRecursiveOperation::new(sender, ());
        engine.add_root(top_root());
        engine.start(OperationMode::List, ActiveFilters::none()).expect("start");
        server.serve(&mut engine, &commands);

        let listed: Vec<String> = server
            .executed
            .iter()
            .filter_map(|command| match command {
                Command::List { path, name, .. } => Some(path.join_name(name).to_string()),
                _ => None,
            })
            .collect();
        prop_assert_eq!(&listed, &expected);
        prop_assert_eq!(engine.processed_directories(), dirs.len() as u64);
        prop_assert_eq!(
            engine.processed_files(),
            shape.iter().filter(|(_, is_dir)| !is_dir).count() as u64
        );
    }

    #[test]
    fn remote_delete_never_removes_a_populated_directory(shape in shapes()) {
        let (mut server, _) = remote_tree(&shape);

        let (sender, commands) = crossbeam_channel::unbounded();
        let mut engine = RemoteRecursiveOperation::new(sender, ());
        engine.add_root(top_root());
        engine.start(OperationMode::Delete, ActiveFilters::none()).expect("start");
        server.serve(&mut engine, &commands);

        prop_assert!(server.refused.is_empty());
        prop_assert_eq!(server.dirs.len(), 1);
        prop_assert!(!engine.is_active());
    }

    #[test]
    fn remote_delete_spares_filtered_files(shape in shapes(), keep in 0usize..40) {
        let (mut server, _) = remote_tree(&shape);
        let kept = format!("n{keep}");

        let (sender, commands) = crossbeam_channel::unbounded();
        let mut engine = RemoteRecursiveOperation::new(sender, ());
        engine.add_root(top_root());
        let name = kept.clone();
        let filter = move |entry: &FilterEntry<'_>| entry.name == name;
        engine
            .start(OperationMode::Delete, ActiveFilters::new(NoFilter, filter))
            .expect("start");
        server.serve(&mut engine, &commands);

        let remaining: Vec<&RemoteEntry> = server.dirs.values().flatten().collect();
        match shape.get(keep) {
            Some(&(_, false)) => {
                prop_assert!(remaining.iter().any(|entry| entry.name == kept));
                prop_assert!(remaining.iter().all(|entry| entry.name == kept || entry.is_dir));
                prop_assert!(!server.refused.is_empty());
            }
            Some(&(_, true)) => {
                prop_assert!(remaining.iter().any(|entry| entry.name == kept && entry.is_dir));
            }
            None => {
                prop_assert!(server.refused.is_empty());
                prop_assert!(remaining.is_empty());
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn local_traversal_reports_every_file_once(
        shape in shapes(),
        capacity in 1usize..6,
    ) {
        let tree = TestTree::new();
        let mut dirs = vec![std::path::PathBuf::from("top")];
        tree.mkdir("top");
        let mut expected = BTreeSet::new();
        for (index, &(parent, is_dir)) in shape.iter().enumerate() {
            let relative = dirs[parent % dirs.len()].join(format!("n{index}"));
            if is_dir {
                tree.mkdir(&relative);
                dirs.push(relative);
            } else {
                tree.write(&relative, "");
                expected.insert(tree.path(&relative));
            }
        }

        let engine = LocalTraversalBuilder::new()
            .config(dirops::walk::LocalTraversalConfig::default().with_batch_capacity(capacity))
            .build();
        let top = tree.path("top");
        let mut root = RecursionRoot::new(top.clone(), false);
        root.add_dir_to_visit(top.clone(), "", None, true, LinkKind::NotALink);
        engine.add_root(root);
        engine.start(OperationMode::List, ActiveFilters::none(), false).expect("start");

        let mut seen = BTreeSet::new();
        let mut terminals = 0;
        while let Some(batch) = engine.next_batch() {
            prop_assert!(batch.len() <= capacity);
            terminals += usize::from(batch.is_terminal());
            for file in &batch.files {
                prop_assert!(seen.insert(batch.source.join(&file.name)));
            }
        }
        prop_assert_eq!(terminals, 1);
        prop_assert_eq!(seen, expected);
        prop_assert_eq!(engine.processed_directories(), dirs.len() as u64);
    }
}
