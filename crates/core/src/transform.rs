// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pure conversions between the V1 (`uri`) and V2 (`source`) message layouts.
//!
//! All three operations are total over any input mapping (missing fields are
//! simply not copied) and idempotent on their own output. None of them
//! perform I/O; callers decide how the result is written back.

use crate::message::{
    Fields, FIELD_NAME, FIELD_SIZE, FIELD_SOURCE, FIELD_STATUS, FIELD_URI, MIGRATION_FLAG,
};
use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Convert a V1 message to strict V2 shape.
///
/// `source` is set from `uri` when `uri` is present; an existing `source`
/// that differs is overwritten (`uri` is the source of truth in this
/// direction). The V1-only fields `size`, `name`, `uri`, and `status` are
/// removed.
pub fn to_v2(fields: &Fields) -> Fields {
    let mut result = fields.clone();

    if let Some(uri) = fields.get(FIELD_URI) {
        result.insert(FIELD_SOURCE.to_string(), uri.clone());
    }

    result.insert(MIGRATION_FLAG.to_string(), FieldValue::Bool(true));

    result.remove(FIELD_SIZE);
    result.remove(FIELD_NAME);
    result.remove(FIELD_URI);
    result.remove(FIELD_STATUS);

    result
}

/// Convert a V2 message to strict V1 shape.
///
/// `uri` is set from `source` when `source` is present, and `source` is
/// removed.
pub fn to_v1(fields: &Fields) -> Fields {
    let mut result = fields.clone();

    if let Some(source) = fields.get(FIELD_SOURCE) {
        result.insert(FIELD_URI.to_string(), source.clone());
    }
    result.remove(FIELD_SOURCE);

    result.insert(MIGRATION_FLAG.to_string(), FieldValue::Bool(true));

    result
}

/// Make a message readable by both V1 and V2 clients.
///
/// When exactly one of `uri`/`source` is present the other is populated
/// with the same value. When both are present neither is touched, even if
/// they differ. No fields are ever removed.
pub fn to_all_versions_compatible(fields: &Fields) -> Fields {
    let mut result = fields.clone();

    match (fields.get(FIELD_URI), fields.get(FIELD_SOURCE)) {
        (Some(uri), None) => {
            result.insert(FIELD_SOURCE.to_string(), uri.clone());
        }
        (None, Some(source)) => {
            result.insert(FIELD_URI.to_string(), source.clone());
        }
        _ => {}
    }

    result.insert(MIGRATION_FLAG.to_string(), FieldValue::Bool(true));

    result
}

/// Conversion direction, selected by the caller of a sweep or handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// `to_v2`: forward conversion, drops V1-only fields
    V1ToV2,
    /// `to_v1`: backward conversion
    V2ToV1,
    /// `to_all_versions_compatible`: conservative reconciliation
    AllVersionsCompatible,
}

impl Transform {
    pub fn apply(&self, fields: &Fields) -> Fields {
        match self {
            Transform::V1ToV2 => to_v2(fields),
            Transform::V2ToV1 => to_v1(fields),
            Transform::AllVersionsCompatible => to_all_versions_compatible(fields),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::V1ToV2 => write!(f, "v1_to_v2"),
            Transform::V2ToV1 => write!(f, "v2_to_v1"),
            Transform::AllVersionsCompatible => write!(f, "all_versions_compatible"),
        }
    }
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
