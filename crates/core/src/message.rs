// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Message field names and the migration marker.

use crate::value::FieldValue;
use std::collections::BTreeMap;

/// V1 attachment locator
pub const FIELD_URI: &str = "uri";
/// V2 attachment locator
pub const FIELD_SOURCE: &str = "source";
/// V1-only attachment byte size
pub const FIELD_SIZE: &str = "size";
/// V1-only attachment display name
pub const FIELD_NAME: &str = "name";
/// V1-only delivery status
pub const FIELD_STATUS: &str = "status";
/// Creation timestamp, the sweep's ordering key
pub const FIELD_CREATED_AT: &str = "createdAt";

/// Marker set by every conversion direction once a record has been
/// transformed. The sole idempotence gate for sweeps and reactive handlers.
pub const MIGRATION_FLAG: &str = "V2MigrationCompleted";

/// A document's field mapping.
pub type Fields = BTreeMap<String, FieldValue>;

/// True once any conversion has been applied to the record.
pub fn is_migrated(fields: &Fields) -> bool {
    matches!(fields.get(MIGRATION_FLAG), Some(FieldValue::Bool(true)))
}

/// A mapping containing only the migration marker, for flag-only updates.
pub fn migration_marker() -> Fields {
    let mut fields = Fields::new();
    fields.insert(MIGRATION_FLAG.to_string(), FieldValue::Bool(true));
    fields
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
