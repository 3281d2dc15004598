// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handlers invoked once per newly created document.
//!
//! The store's change-notification infrastructure dispatches these with the
//! triggering document's snapshot. They apply the same pure conversions the
//! sweep uses, one document at a time, and may run concurrently with a
//! sweep: both sides check the migration marker before writing and both
//! converge on the same final state, so the race costs at most one
//! redundant write.

use mm_core::{is_migrated, migration_marker, to_all_versions_compatible, to_v1, to_v2};
use mm_storage::{Document, DocumentStore, StoreError, WriteBatch};
use thiserror::Error;
use tracing::info;

/// Errors from a reactive handler
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// What a handler did with the triggering document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Conversion applied and written
    Applied,
    /// Document was already marked migrated
    Skipped,
}

/// Reconcile a newly created message in place so both V1 and V2 clients
/// can read it.
pub async fn make_compatible_on_created<S: DocumentStore>(
    store: &S,
    doc: &Document,
) -> Result<Outcome, AdapterError> {
    if is_migrated(&doc.fields) {
        return Ok(Outcome::Skipped);
    }

    let compatible = to_all_versions_compatible(&doc.fields);
    let mut batch = WriteBatch::new();
    batch.update(doc.path.clone(), compatible, Vec::new());
    store.commit(batch).await?;

    info!(message_id = %doc.path.message, "updated message to be compatible with all versions");
    Ok(Outcome::Applied)
}

/// Copy a newly created V1 message into the sibling collection in V2
/// shape, flagging the original so no sweep reprocesses it.
pub async fn copy_to_v2_on_created<S: DocumentStore>(
    store: &S,
    doc: &Document,
    sibling_collection: &str,
) -> Result<Outcome, AdapterError> {
    if is_migrated(&doc.fields) {
        return Ok(Outcome::Skipped);
    }

    let converted = to_v2(&doc.fields);
    let mut batch = WriteBatch::new();
    batch.create(doc.path.sibling(sibling_collection), converted);
    batch.update(doc.path.clone(), migration_marker(), Vec::new());
    store.commit(batch).await?;

    info!(message_id = %doc.path.message, "created V2 copy of message");
    Ok(Outcome::Applied)
}

/// Mirror image for documents born in the sibling collection: copy back
/// into the primary collection in V1 shape and flag the original.
pub async fn copy_to_v1_on_created<S: DocumentStore>(
    store: &S,
    doc: &Document,
    primary_collection: &str,
) -> Result<Outcome, AdapterError> {
    if is_migrated(&doc.fields) {
        return Ok(Outcome::Skipped);
    }

    let converted = to_v1(&doc.fields);
    let mut batch = WriteBatch::new();
    batch.create(doc.path.sibling(primary_collection), converted);
    batch.update(doc.path.clone(), migration_marker(), Vec::new());
    store.commit(batch).await?;

    info!(message_id = %doc.path.message, "created V1 copy of message");
    Ok(Outcome::Applied)
}

#[cfg(test)]
#[path = "created_tests.rs"]
mod tests;
