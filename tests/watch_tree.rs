// tests/watch_tree.rs

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use watchrun::watch::{ChangeKind, WatchTree};
use watchrun_test_utils::builders::WatchSpecBuilder;
use watchrun_test_utils::fake_source::{FakeSource, SourceCall};
use watchrun_test_utils::init_tracing;

#[test]
fn initialize_subscribes_every_directory_honoring_excludes() {
    init_tracing();

    let tmp = tempdir().unwrap();
    let root = tmp.path().to_path_buf();
    fs::create_dir_all(root.join("build/cache")).unwrap();
    fs::create_dir_all(root.join("build2")).unwrap();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src/main.rs"), "fn main() {}").unwrap();

    let spec = WatchSpecBuilder::new(&root)
        .exclude(root.join("build"))
        .pipeline(&["make"])
        .build();

    let source = FakeSource::new();
    let (_, active) = source.handles();
    let mut tree = WatchTree::new(Box::new(source));
    tree.initialize("app", &spec);

    let active = active.lock().unwrap().clone();
    assert!(active.contains(&root));
    assert!(active.contains(&root.join("src")));
    // `build` is excluded; `build2` must not be caught by the same prefix.
    assert!(active.contains(&root.join("build2")));
    assert!(!active.contains(&root.join("build")));
    assert!(!active.contains(&root.join("build/cache")));
    // Files are never subscribed.
    assert!(!active.contains(&root.join("src/main.rs")));

    assert_eq!(tree.subscribed_dirs("app").len(), active.len());
}

#[test]
fn add_fails_for_unstattable_paths() {
    init_tracing();

    let tmp = tempdir().unwrap();
    let spec = WatchSpecBuilder::new(tmp.path()).pipeline(&["make"]).build();

    let mut tree = WatchTree::new(Box::new(FakeSource::new()));
    let missing = tmp.path().join("vanished");
    assert!(tree.add("app", &spec, &missing).is_err());
}

#[test]
fn add_is_idempotent_per_directory() {
    init_tracing();

    let tmp = tempdir().unwrap();
    let spec = WatchSpecBuilder::new(tmp.path()).pipeline(&["make"]).build();

    let source = FakeSource::new();
    let (calls, _) = source.handles();
    let mut tree = WatchTree::new(Box::new(source));

    tree.add("app", &spec, tmp.path()).unwrap();
    tree.add("app", &spec, tmp.path()).unwrap();

    let subscribe_calls = calls
        .lock()
        .unwrap()
        .iter()
        .filter(|c| matches!(c, SourceCall::Subscribe(_)))
        .count();
    assert_eq!(subscribe_calls, 1);
}

#[test]
fn remove_unsubscribes_descendants_but_not_siblings() {
    init_tracing();

    let tmp = tempdir().unwrap();
    let root = tmp.path().to_path_buf();
    fs::create_dir_all(root.join("b/c")).unwrap();
    fs::create_dir_all(root.join("bc")).unwrap();

    let spec = WatchSpecBuilder::new(&root).pipeline(&["make"]).build();

    let source = FakeSource::new();
    let (_, active) = source.handles();
    let mut tree = WatchTree::new(Box::new(source));
    tree.initialize("app", &spec);

    tree.remove("app", &root.join("b")).unwrap();

    let active = active.lock().unwrap().clone();
    assert!(!active.contains(&root.join("b")));
    assert!(!active.contains(&root.join("b/c")));
    assert!(active.contains(&root.join("bc")));

    let remaining = tree.subscribed_dirs("app");
    assert!(remaining.contains(&root.join("bc")));
    assert!(!remaining.iter().any(|d| d.starts_with(root.join("b"))));
}

#[test]
fn reconcile_walks_directories_created_in_bulk() {
    init_tracing();

    let tmp = tempdir().unwrap();
    let root = tmp.path().to_path_buf();
    let spec = WatchSpecBuilder::new(&root).pipeline(&["make"]).build();

    let source = FakeSource::new();
    let (_, active) = source.handles();
    let mut tree = WatchTree::new(Box::new(source));
    tree.initialize("app", &spec);

    // A whole subtree appears at once (e.g. an extracted archive).
    fs::create_dir_all(root.join("vendored/pkg/src")).unwrap();

    let mut events = BTreeMap::new();
    events.insert(root.join("vendored"), ChangeKind::Create);
    tree.reconcile("app", &spec, &events).unwrap();

    let active = active.lock().unwrap().clone();
    assert!(active.contains(&root.join("vendored")));
    assert!(active.contains(&root.join("vendored/pkg")));
    assert!(active.contains(&root.join("vendored/pkg/src")));
}

#[test]
fn reconcile_unsubscribes_removed_and_renamed_directories() {
    init_tracing();

    let tmp = tempdir().unwrap();
    let root = tmp.path().to_path_buf();
    fs::create_dir_all(root.join("old")).unwrap();
    fs::create_dir_all(root.join("gone/deeper")).unwrap();

    let spec = WatchSpecBuilder::new(&root).pipeline(&["make"]).build();

    let source = FakeSource::new();
    let (_, active) = source.handles();
    let mut tree = WatchTree::new(Box::new(source));
    tree.initialize("app", &spec);

    fs::remove_dir_all(root.join("gone")).unwrap();
    fs::rename(root.join("old"), root.join("new")).unwrap();

    let mut events = BTreeMap::new();
    events.insert(root.join("gone"), ChangeKind::Remove);
    events.insert(root.join("old"), ChangeKind::Rename);
    tree.reconcile("app", &spec, &events).unwrap();

    let active = active.lock().unwrap().clone();
    assert!(!active.contains(&root.join("gone")));
    assert!(!active.contains(&root.join("gone/deeper")));
    // Renames unsubscribe unconditionally; re-adding waits for a Create
    // event observed for the new path.
    assert!(!active.contains(&root.join("old")));
    assert!(!active.contains(&root.join("new")));
}

#[test]
fn unsubscribe_failure_propagates() {
    init_tracing();

    let tmp = tempdir().unwrap();
    let root: PathBuf = tmp.path().to_path_buf();
    fs::create_dir_all(root.join("sub")).unwrap();

    let spec = WatchSpecBuilder::new(&root).pipeline(&["make"]).build();

    let mut tree = WatchTree::new(Box::new(FakeSource::failing_unsubscribe()));
    tree.initialize("app", &spec);

    assert!(tree.remove("app", &root.join("sub")).is_err());
}
