// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Document paths within the hierarchical store.
//!
//! A message lives at `{rooms}/{roomId}/{collection}/{messageId}`. Write
//! targets are always resolved from a record's own path, so the partition
//! (room) a record came from is the partition it is written back to.

use crate::id::{MessageId, RoomId};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors from parsing a document path
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("malformed document path: {0}")]
    Malformed(String),
}

/// Fully-qualified path of a message document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocPath {
    /// Top-level collection holding the rooms, e.g. `rooms`
    pub rooms: String,
    pub room: RoomId,
    /// Sub-collection within the room, e.g. `messages` or `messages_v2`
    pub collection: String,
    pub message: MessageId,
}

impl DocPath {
    pub fn new(
        rooms: impl Into<String>,
        room: impl Into<RoomId>,
        collection: impl Into<String>,
        message: impl Into<MessageId>,
    ) -> Self {
        Self {
            rooms: rooms.into(),
            room: room.into(),
            collection: collection.into(),
            message: message.into(),
        }
    }

    /// Parse a slash-separated path of exactly four non-empty segments.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let segments: Vec<&str> = path.split('/').collect();
        match segments.as_slice() {
            [rooms, room, collection, message]
                if !rooms.is_empty()
                    && !room.is_empty()
                    && !collection.is_empty()
                    && !message.is_empty() =>
            {
                Ok(Self::new(*rooms, *room, *collection, *message))
            }
            _ => Err(PathError::Malformed(path.to_string())),
        }
    }

    /// Re-address the same room and message id into a sibling collection.
    pub fn sibling(&self, collection: impl Into<String>) -> Self {
        Self {
            rooms: self.rooms.clone(),
            room: self.room.clone(),
            collection: collection.into(),
            message: self.message.clone(),
        }
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.rooms, self.room, self.collection, self.message
        )
    }
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
