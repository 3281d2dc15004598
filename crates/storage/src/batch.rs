// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Staged writes committed as one atomic unit.

use mm_core::{DocPath, Fields};

/// Store-imposed limit on writes per committed batch
pub const MAX_BATCH_WRITES: usize = 500;

/// A single staged write.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Partial merge: `set` entries are written, `unset` names are deleted.
    /// The target document must exist.
    Update {
        path: DocPath,
        set: Fields,
        unset: Vec<String>,
    },
    /// Full-document write; overwrites any existing document at the path.
    Create { path: DocPath, fields: Fields },
}

impl WriteOp {
    pub fn path(&self) -> &DocPath {
        match self {
            WriteOp::Update { path, .. } | WriteOp::Create { path, .. } => path,
        }
    }
}

/// Writes staged for one atomic commit, in staging order.
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a partial update of an existing document.
    pub fn update(&mut self, path: DocPath, set: Fields, unset: Vec<String>) {
        self.ops.push(WriteOp::Update { path, set, unset });
    }

    /// Stage a full-document write.
    pub fn create(&mut self, path: DocPath, fields: Fields) {
        self.ops.push(WriteOp::Create { path, fields });
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}

#[cfg(test)]
#[path = "batch_tests.rs"]
mod tests;
