// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory document store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use crate::batch::{WriteBatch, WriteOp, MAX_BATCH_WRITES};
use crate::store::{Cursor, Document, DocumentStore, GroupQuery, StoreError};
use async_trait::async_trait;
use mm_core::{DocPath, Fields};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

#[derive(Default)]
struct MemoryState {
    docs: BTreeMap<DocPath, Fields>,
    /// Countdown of successful commits before the armed failure fires
    fail_commit: Option<(usize, u32, String)>,
    fail_queries: Option<(u32, String)>,
    commits: usize,
}

/// In-memory `DocumentStore` with error injection.
///
/// Faithful to the contract the engine relies on: group scans are filtered
/// by the parent collection name and documents lacking the ordering field,
/// ordered by the `(order_value, path)` pair with strict start-after, and
/// batch commits are atomic with the store's per-batch write limit.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or overwrite a document.
    pub fn insert(&self, path: DocPath, fields: Fields) {
        self.inner.lock().docs.insert(path, fields);
    }

    /// Current fields of a document, if present.
    pub fn document(&self, path: &DocPath) -> Option<Fields> {
        self.inner.lock().docs.get(path).cloned()
    }

    /// All documents under a given collection name, in path order.
    pub fn collection(&self, collection: &str) -> Vec<Document> {
        self.inner
            .lock()
            .docs
            .iter()
            .filter(|(path, _)| path.collection == collection)
            .map(|(path, fields)| Document::new(path.clone(), fields.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().docs.is_empty()
    }

    /// Number of successfully committed batches.
    pub fn commits(&self) -> usize {
        self.inner.lock().commits
    }

    /// Fail the next commit with the given status, then recover.
    pub fn fail_next_commit(&self, code: u32, message: impl Into<String>) {
        self.fail_after_commits(0, code, message);
    }

    /// Let `successes` commits through, fail the one after, then recover.
    pub fn fail_after_commits(&self, successes: usize, code: u32, message: impl Into<String>) {
        self.inner.lock().fail_commit = Some((successes, code, message.into()));
    }

    /// Fail every query with the given status until cleared.
    pub fn fail_queries(&self, code: u32, message: impl Into<String>) {
        self.inner.lock().fail_queries = Some((code, message.into()));
    }

    pub fn clear_query_failure(&self) {
        self.inner.lock().fail_queries = None;
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn query_group(&self, query: &GroupQuery) -> Result<Vec<Document>, StoreError> {
        let state = self.inner.lock();

        if let Some((code, message)) = &state.fail_queries {
            return Err(StoreError::Query {
                code: *code,
                message: message.clone(),
            });
        }

        let mut page: Vec<(Cursor, Document)> = state
            .docs
            .iter()
            .filter(|(path, _)| path.collection == query.collection_group)
            .filter_map(|(path, fields)| {
                let doc = Document::new(path.clone(), fields.clone());
                doc.cursor(&query.order_by).map(|cursor| (cursor, doc))
            })
            .collect();

        page.sort_by(|(a, _), (b, _)| {
            a.order_value
                .cmp(&b.order_value)
                .then_with(|| a.path.cmp(&b.path))
        });

        if let Some(after) = &query.start_after {
            page.retain(|(cursor, _)| {
                cursor
                    .order_value
                    .cmp(&after.order_value)
                    .then_with(|| cursor.path.cmp(&after.path))
                    .is_gt()
            });
        }

        page.truncate(query.limit);
        Ok(page.into_iter().map(|(_, doc)| doc).collect())
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let mut state = self.inner.lock();

        if let Some((remaining, code, message)) = state.fail_commit.take() {
            if remaining == 0 {
                return Err(StoreError::Commit { code, message });
            }
            state.fail_commit = Some((remaining - 1, code, message));
        }

        if batch.len() > MAX_BATCH_WRITES {
            return Err(StoreError::BatchTooLarge {
                ops: batch.len(),
                max: MAX_BATCH_WRITES,
            });
        }

        // Validate before applying anything: the batch is all-or-nothing.
        // An update may target a document a create earlier in the same
        // batch will bring into existence.
        let mut created: HashSet<&DocPath> = HashSet::new();
        for op in batch.ops() {
            match op {
                WriteOp::Create { path, .. } => {
                    created.insert(path);
                }
                WriteOp::Update { path, .. } => {
                    if !state.docs.contains_key(path) && !created.contains(path) {
                        return Err(StoreError::NotFound { path: path.clone() });
                    }
                }
            }
        }

        for op in batch.into_ops() {
            match op {
                WriteOp::Update { path, set, unset } => {
                    if let Some(doc) = state.docs.get_mut(&path) {
                        for (key, value) in set {
                            doc.insert(key, value);
                        }
                        for key in unset {
                            doc.remove(&key);
                        }
                    }
                }
                WriteOp::Create { path, fields } => {
                    state.docs.insert(path, fields);
                }
            }
        }

        state.commits += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
