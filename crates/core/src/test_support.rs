// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builders shared by unit and integration tests.
#![cfg_attr(coverage_nightly, coverage(off))]

use crate::message::{Fields, FIELD_CREATED_AT, FIELD_NAME, FIELD_SIZE, FIELD_STATUS, FIELD_URI};
use crate::value::FieldValue;

/// Field mapping from literal entries.
pub fn fields(entries: &[(&str, FieldValue)]) -> Fields {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// A V1-shaped message with an attachment, created at the given epoch second.
pub fn v1_message(uri: &str, created_secs: i64) -> Fields {
    fields(&[
        ("text", "hello".into()),
        (FIELD_URI, uri.into()),
        (FIELD_SIZE, FieldValue::Int(2048)),
        (FIELD_NAME, "photo.jpg".into()),
        (FIELD_STATUS, "sent".into()),
        (FIELD_CREATED_AT, FieldValue::timestamp(created_secs)),
    ])
}
