// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! mm-core: document model and schema conversions for the message migration

pub mod id;
pub mod message;
pub mod path;
pub mod transform;
pub mod value;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use id::{MessageId, RoomId};
pub use message::{
    is_migrated, migration_marker, Fields, FIELD_CREATED_AT, FIELD_NAME, FIELD_SIZE, FIELD_SOURCE,
    FIELD_STATUS, FIELD_URI, MIGRATION_FLAG,
};
pub use path::{DocPath, PathError};
pub use transform::{to_all_versions_compatible, to_v1, to_v2, Transform};
pub use value::FieldValue;
