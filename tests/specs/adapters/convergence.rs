//! Reactive handlers racing and composing with sweeps.

use crate::prelude::*;
use mm_adapters::{copy_to_v2_on_created, make_compatible_on_created, Outcome};
use mm_core::test_support::v1_message;
use mm_core::{is_migrated, Transform, FIELD_SOURCE, FIELD_URI};
use mm_engine::{SweepConfig, Sweeper, WriteMode};
use mm_storage::{Document, MemoryStore};

#[tokio::test]
async fn handler_then_sweep_converges_without_extra_writes() {
    let store = MemoryStore::new();
    let path = message("r1", "m1");
    let fields = v1_message("https://cdn/a", 100);
    store.insert(path.clone(), fields.clone());

    // The reactive path wins the race on this document
    let doc = Document::new(path.clone(), fields);
    let outcome = make_compatible_on_created(&store, &doc).await.unwrap();
    assert_eq!(outcome, Outcome::Applied);
    let settled = store.document(&path).unwrap();

    // A later sweep observes the marker and leaves the record alone
    let sweeper = Sweeper::new(store.clone(), SweepConfig::default());
    let summary = sweeper.run(Transform::AllVersionsCompatible).await.unwrap();
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.transformed, 0);
    assert_eq!(store.document(&path).unwrap(), settled);
}

#[tokio::test]
async fn sweep_then_handler_converges_to_the_same_state() {
    let store = MemoryStore::new();
    let path = message("r1", "m1");
    store.insert(path.clone(), v1_message("https://cdn/a", 100));

    let sweeper = Sweeper::new(store.clone(), SweepConfig::default());
    sweeper.run(Transform::AllVersionsCompatible).await.unwrap();
    let settled = store.document(&path).unwrap();

    // The handler fires late, with the post-sweep snapshot, and skips
    let doc = Document::new(path.clone(), settled.clone());
    let outcome = make_compatible_on_created(&store, &doc).await.unwrap();
    assert_eq!(outcome, Outcome::Skipped);
    assert_eq!(store.document(&path).unwrap(), settled);
}

#[tokio::test]
async fn stale_snapshot_race_still_converges() {
    let store = MemoryStore::new();
    let path = message("r1", "m1");
    let fields = v1_message("https://cdn/a", 100);
    store.insert(path.clone(), fields.clone());

    // Both paths read the unmarked document before either writes: the
    // narrow window the marker gate does not close
    let stale = Document::new(path.clone(), fields);
    let sweeper = Sweeper::new(store.clone(), SweepConfig::default());
    sweeper.run(Transform::AllVersionsCompatible).await.unwrap();

    // The handler's write is redundant but not corrupting
    let outcome = make_compatible_on_created(&store, &stale).await.unwrap();
    assert_eq!(outcome, Outcome::Applied);

    let doc = store.document(&path).unwrap();
    assert!(is_migrated(&doc));
    assert_eq!(doc.get(FIELD_URI), Some(&"https://cdn/a".into()));
    assert_eq!(doc.get(FIELD_SOURCE), Some(&"https://cdn/a".into()));
}

#[tokio::test]
async fn dual_write_handler_matches_duplicate_sweep_output() {
    let store = MemoryStore::new();

    // One record arrives through the reactive path
    let reactive_path = message("r1", "m1");
    let reactive_fields = v1_message("https://cdn/a", 100);
    store.insert(reactive_path.clone(), reactive_fields.clone());
    copy_to_v2_on_created(
        &store,
        &Document::new(reactive_path.clone(), reactive_fields),
        "messages_v2",
    )
    .await
    .unwrap();

    // Another is picked up by a duplicate-mode sweep
    let swept_path = message("r1", "m2");
    store.insert(swept_path.clone(), v1_message("https://cdn/b", 200));
    let config = SweepConfig {
        mode: WriteMode::Duplicate,
        ..SweepConfig::default()
    };
    Sweeper::new(store.clone(), config)
        .run(Transform::V1ToV2)
        .await
        .unwrap();

    // Both routes produce the same V2 shape and the same original marking
    for path in [&reactive_path, &swept_path] {
        let copy = store.document(&path.sibling("messages_v2")).unwrap();
        assert!(copy.contains_key(FIELD_SOURCE));
        assert!(!copy.contains_key(FIELD_URI));
        assert!(is_migrated(&store.document(path).unwrap()));
    }
}
