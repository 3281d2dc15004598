// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Query interface over a hierarchical document store.
//!
//! The engine only ever needs one read shape: "query a named collection
//! group, order ascending by a named field, limit to N, optionally start
//! strictly after a cursor". The store handle is threaded explicitly
//! through every entry point so the engine can run against any
//! implementation, including the in-memory one used in tests.

use crate::batch::WriteBatch;
use async_trait::async_trait;
use mm_core::{DocPath, FieldValue, Fields};
use thiserror::Error;

/// Backend status code for a failed precondition, e.g. a missing index
pub const FAILED_PRECONDITION: u32 = 9;
/// Backend status code for a write addressing a missing document
pub const NOT_FOUND: u32 = 5;

/// Errors surfaced by a document store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("query failed (code {code}): {message}")]
    Query { code: u32, message: String },
    #[error("batch commit failed (code {code}): {message}")]
    Commit { code: u32, message: String },
    #[error("batch of {ops} writes exceeds the store limit of {max}")]
    BatchTooLarge { ops: usize, max: usize },
    #[error("no document at {path}")]
    NotFound { path: DocPath },
}

impl StoreError {
    /// Backend status code, where the backend reported one.
    pub fn code(&self) -> Option<u32> {
        match self {
            StoreError::Query { code, .. } | StoreError::Commit { code, .. } => Some(*code),
            StoreError::NotFound { .. } => Some(NOT_FOUND),
            StoreError::BatchTooLarge { .. } => None,
        }
    }

    /// Whether this failure is the backend refusing a query for lack of a
    /// composite index. Matches on the failed-precondition signature the
    /// backend puts in the status code and message.
    pub fn is_missing_index(&self) -> bool {
        matches!(
            self,
            StoreError::Query { code, message }
                if *code == FAILED_PRECONDITION && message.contains("FAILED_PRECONDITION")
        )
    }
}

/// An (id, partition-path, field-mapping) tuple returned by a query.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub path: DocPath,
    pub fields: Fields,
}

impl Document {
    pub fn new(path: DocPath, fields: Fields) -> Self {
        Self { path, fields }
    }

    /// Resumption cursor pointing just past this document, or `None` when
    /// the document lacks the ordering field.
    pub fn cursor(&self, order_by: &str) -> Option<Cursor> {
        self.fields.get(order_by).map(|value| Cursor {
            order_value: value.clone(),
            path: self.path.clone(),
        })
    }
}

/// Position within a collection-group ordering.
///
/// The ordering-field value alone is not a strict total order (two records
/// may share a `createdAt`), so the document path rides along as a
/// deterministic secondary key. Start-after comparisons are over the
/// `(order_value, path)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    pub order_value: FieldValue,
    pub path: DocPath,
}

/// A paged collection-group query, ascending over `order_by`.
///
/// Documents that do not contain `order_by` are excluded from results.
#[derive(Debug, Clone)]
pub struct GroupQuery {
    pub collection_group: String,
    pub order_by: String,
    pub start_after: Option<Cursor>,
    pub limit: usize,
}

impl GroupQuery {
    pub fn new(
        collection_group: impl Into<String>,
        order_by: impl Into<String>,
        limit: usize,
    ) -> Self {
        Self {
            collection_group: collection_group.into(),
            order_by: order_by.into(),
            start_after: None,
            limit,
        }
    }

    /// Start strictly after the given cursor.
    pub fn start_after(mut self, cursor: Cursor) -> Self {
        self.start_after = Some(cursor);
        self
    }
}

/// Handle to a document store.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Execute a collection-group query, returning an ordered page.
    async fn query_group(&self, query: &GroupQuery) -> Result<Vec<Document>, StoreError>;

    /// Commit a staged batch atomically: all writes apply or none do.
    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
