// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sweep configuration.

use mm_storage::MAX_BATCH_WRITES;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading a sweep configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid sweep config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Where transformed records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Update each record where it lives
    InPlace,
    /// Create a converted copy in the sibling collection and flag the
    /// original as migrated
    Duplicate,
}

/// Configuration of one sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// Top-level collection holding the rooms
    pub rooms_collection: String,
    /// Collection group the sweep scans
    pub messages_collection: String,
    /// Target collection for duplicate-mode copies
    pub sibling_collection: String,
    /// Ordering/cursor field
    pub order_field: String,
    /// Records requested per page
    pub page_size: usize,
    pub mode: WriteMode,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            rooms_collection: "rooms".to_string(),
            messages_collection: "messages".to_string(),
            sibling_collection: "messages_v2".to_string(),
            order_field: "createdAt".to_string(),
            page_size: 500,
            mode: WriteMode::InPlace,
        }
    }
}

impl SweepConfig {
    /// Load from a TOML document; unknown keys are rejected.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Writes staged per transformed record in the configured mode.
    pub fn writes_per_record(&self) -> usize {
        match self.mode {
            WriteMode::InPlace => 1,
            WriteMode::Duplicate => 2,
        }
    }

    /// Page size capped so a full page's staged writes always fit in one
    /// atomic batch, and never zero (a zero page can make no progress).
    pub fn effective_page_size(&self) -> usize {
        self.page_size
            .min(MAX_BATCH_WRITES / self.writes_per_record())
            .max(1)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
