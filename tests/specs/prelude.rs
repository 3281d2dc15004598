//! Test helpers for behavioral specifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use mm_core::test_support::v1_message;
use mm_core::{DocPath, Fields};
use mm_storage::MemoryStore;

/// Path of a message in the primary collection.
pub fn message(room: &str, id: &str) -> DocPath {
    DocPath::new("rooms", room, "messages", id)
}

/// Seed `count` V1 messages spread over three rooms with distinct,
/// ascending `createdAt` timestamps.
pub fn seed_corpus(store: &MemoryStore, count: usize) -> Vec<DocPath> {
    (0..count)
        .map(|i| {
            let path = message(&format!("r{}", i % 3), &format!("m{i:04}"));
            store.insert(path.clone(), v1_message(&format!("https://cdn/{i}"), 1_000 + i as i64));
            path
        })
        .collect()
}

/// Seed `count` V1 messages all sharing one `createdAt` value.
pub fn seed_tied_corpus(store: &MemoryStore, count: usize, created_secs: i64) -> Vec<DocPath> {
    (0..count)
        .map(|i| {
            let path = message("r1", &format!("m{i:04}"));
            store.insert(path.clone(), v1_message(&format!("u{i}"), created_secs));
            path
        })
        .collect()
}

/// Fields of every document in a collection, keyed by path, for
/// before/after comparisons.
pub fn snapshot(store: &MemoryStore, collection: &str) -> Vec<(DocPath, Fields)> {
    store
        .collection(collection)
        .into_iter()
        .map(|doc| (doc.path, doc.fields))
        .collect()
}
