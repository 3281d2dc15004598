//! Full-corpus sweeps in both output modes.

use crate::prelude::*;
use mm_core::{is_migrated, Transform, FIELD_SOURCE, FIELD_URI, MIGRATION_FLAG};
use mm_engine::{SweepConfig, Sweeper, WriteMode};
use mm_storage::MemoryStore;

fn pages_of(page_size: usize, mode: WriteMode) -> SweepConfig {
    SweepConfig {
        page_size,
        mode,
        ..SweepConfig::default()
    }
}

#[tokio::test]
async fn in_place_compatibility_sweep_reconciles_every_record() {
    let store = MemoryStore::new();
    let paths = seed_corpus(&store, 23);

    let sweeper = Sweeper::new(store.clone(), pages_of(5, WriteMode::InPlace));
    let summary = sweeper.run(Transform::AllVersionsCompatible).await.unwrap();

    assert_eq!(summary.transformed, 23);
    assert_eq!(summary.pages, 5);
    for path in &paths {
        let doc = store.document(path).unwrap();
        assert_eq!(doc.get(FIELD_URI), doc.get(FIELD_SOURCE));
        assert!(is_migrated(&doc));
        // V1 auxiliary fields survive the conservative conversion
        assert!(doc.contains_key("size"));
    }
}

#[tokio::test]
async fn duplicate_sweep_builds_a_v2_collection_without_touching_v1_shape() {
    let store = MemoryStore::new();
    let paths = seed_corpus(&store, 12);

    let sweeper = Sweeper::new(store.clone(), pages_of(5, WriteMode::Duplicate));
    let summary = sweeper.run(Transform::V1ToV2).await.unwrap();

    assert_eq!(summary.transformed, 12);
    for path in &paths {
        let original = store.document(path).unwrap();
        assert!(original.contains_key(FIELD_URI));
        assert!(!original.contains_key(FIELD_SOURCE));
        assert!(is_migrated(&original));

        let copy = store.document(&path.sibling("messages_v2")).unwrap();
        assert!(copy.contains_key(FIELD_SOURCE));
        for dropped in [FIELD_URI, "size", "name", "status"] {
            assert!(!copy.contains_key(dropped));
        }
    }
}

#[tokio::test]
async fn strict_v2_in_place_sweep_leaves_no_v1_fields_behind() {
    let store = MemoryStore::new();
    let paths = seed_corpus(&store, 7);

    let sweeper = Sweeper::new(store.clone(), pages_of(3, WriteMode::InPlace));
    sweeper.run(Transform::V1ToV2).await.unwrap();

    for path in &paths {
        let doc = store.document(path).unwrap();
        assert!(doc.contains_key(FIELD_SOURCE));
        assert!(doc.contains_key("text"));
        assert!(doc.contains_key("createdAt"));
        for dropped in [FIELD_URI, "size", "name", "status"] {
            assert!(!doc.contains_key(dropped), "{dropped} left behind");
        }
        assert_eq!(doc.get(MIGRATION_FLAG), Some(&true.into()));
    }
}

#[tokio::test]
async fn empty_corpus_reports_nothing_done() {
    let sweeper = Sweeper::new(MemoryStore::new(), SweepConfig::default());
    let summary = sweeper.run(Transform::AllVersionsCompatible).await.unwrap();
    assert_eq!(summary.transformed, 0);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.pages, 0);
}
