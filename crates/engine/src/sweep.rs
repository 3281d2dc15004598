// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The sweep loop: cursor-paged scan, transform, atomic page commit.
//!
//! A sweep is strictly sequential: one outstanding page query, then one
//! outstanding batch commit, nothing overlapping. Restart safety comes from
//! the migration marker, not from persisting the cursor; a re-invoked sweep
//! rescans from the beginning and no-ops over already-migrated records.

use crate::config::{SweepConfig, WriteMode};
use crate::error::{IndexSpec, SweepError};
use mm_core::{is_migrated, migration_marker, Transform};
use mm_storage::{Cursor, Document, DocumentStore, GroupQuery, StoreError, WriteBatch};
use tracing::{debug, error, info};

/// Counters reported by a completed sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    /// Records transformed and durably written
    pub transformed: u64,
    /// Records skipped because they were already marked migrated
    pub skipped: u64,
    /// Pages committed (pages of only already-migrated records commit nothing)
    pub pages: u64,
}

/// Full-corpus migration sweep over a collection group.
pub struct Sweeper<S> {
    store: S,
    config: SweepConfig,
}

impl<S: DocumentStore> Sweeper<S> {
    pub fn new(store: S, config: SweepConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Run one full sweep, applying `transform` exactly once to every
    /// record not already marked migrated.
    ///
    /// Pages commit independently; a failure aborts the sweep but leaves
    /// prior pages durable. Re-running after a failure is safe and cheap:
    /// already-migrated records are skipped.
    pub async fn run(&self, transform: Transform) -> Result<SweepSummary, SweepError> {
        let mut summary = SweepSummary::default();
        let mut cursor: Option<Cursor> = None;
        let limit = self.config.effective_page_size();

        loop {
            let mut query =
                GroupQuery::new(&self.config.messages_collection, &self.config.order_field, limit);
            if let Some(after) = cursor.take() {
                debug!(after = %after.order_value, path = %after.path, "continuing from cursor");
                query = query.start_after(after);
            }

            let page = self
                .store
                .query_group(&query)
                .await
                .map_err(|err| self.enrich(err))?;
            let Some(last) = page.last() else {
                break;
            };

            let next_cursor = last.cursor(&self.config.order_field).ok_or_else(|| {
                SweepError::CursorUnavailable {
                    path: last.path.clone(),
                    field: self.config.order_field.clone(),
                }
            })?;

            let mut batch = WriteBatch::new();
            let mut staged = 0u64;
            for doc in &page {
                if is_migrated(&doc.fields) {
                    summary.skipped += 1;
                    continue;
                }
                self.stage(&mut batch, doc, transform);
                staged += 1;
            }

            if !batch.is_empty() {
                self.store
                    .commit(batch)
                    .await
                    .map_err(|err| self.enrich(err))?;
                summary.pages += 1;
                summary.transformed += staged;
                info!(count = staged, "committed page");
            }

            // Advance off the last record even when the whole page was
            // skipped, so a rescan over migrated ground still terminates.
            cursor = Some(next_cursor);
        }

        info!(
            transformed = summary.transformed,
            skipped = summary.skipped,
            pages = summary.pages,
            "sweep complete"
        );
        Ok(summary)
    }

    fn stage(&self, batch: &mut WriteBatch, doc: &Document, transform: Transform) {
        let output = transform.apply(&doc.fields);
        match self.config.mode {
            WriteMode::InPlace => {
                // Fields the transform dropped must be unset explicitly; a
                // partial update cannot remove them by omission.
                let unset: Vec<String> = doc
                    .fields
                    .keys()
                    .filter(|key| !output.contains_key(*key))
                    .cloned()
                    .collect();
                batch.update(doc.path.clone(), output, unset);
            }
            WriteMode::Duplicate => {
                batch.create(doc.path.sibling(&self.config.sibling_collection), output);
                batch.update(doc.path.clone(), migration_marker(), Vec::new());
            }
        }
    }

    /// Attach remediation detail to index errors; log everything else with
    /// its diagnostics and pass it through.
    fn enrich(&self, err: StoreError) -> SweepError {
        if err.is_missing_index() {
            let index = IndexSpec {
                collection_group: self.config.messages_collection.clone(),
                field: self.config.order_field.clone(),
                direction: "ASC".to_string(),
            };
            error!(
                collection_group = %index.collection_group,
                field = %index.field,
                direction = %index.direction,
                code = ?err.code(),
                error = %err,
                "query requires a composite index; create it and re-run the sweep"
            );
            SweepError::MissingIndex { index, source: err }
        } else {
            error!(code = ?err.code(), error = %err, "sweep aborted");
            SweepError::Store(err)
        }
    }
}

#[cfg(test)]
#[path = "sweep_tests.rs"]
mod tests;
