// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the migration engine

use mm_core::DocPath;
use mm_storage::StoreError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The composite index a collection-group query needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexSpec {
    pub collection_group: String,
    pub field: String,
    pub direction: String,
}

impl fmt::Display for IndexSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "collection group '{}', fields: {} {}",
            self.collection_group, self.field, self.direction
        )
    }
}

/// Errors that can abort a sweep
#[derive(Debug, Error)]
pub enum SweepError {
    /// The backend refused the query for lack of a composite index. Create
    /// the index described by `index` and re-run the sweep.
    #[error("missing composite index ({index}): {source}")]
    MissingIndex {
        index: IndexSpec,
        #[source]
        source: StoreError,
    },
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    /// The store returned a document without the ordering field; the sweep
    /// cannot advance its cursor past it.
    #[error("document {path} is missing ordering field '{field}'")]
    CursorUnavailable { path: DocPath, field: String },
}
