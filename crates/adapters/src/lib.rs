// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Reactive per-document handlers over the shared conversion library

mod created;

pub use created::{
    copy_to_v1_on_created, copy_to_v2_on_created, make_compatible_on_created, AdapterError,
    Outcome,
};
