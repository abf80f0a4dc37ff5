//! Analysis configuration
//!
//! The configuration is an explicitly passed, immutable value. Nothing in
//! the engine reads process-wide state.

use serde::{Deserialize, Serialize};

/// Thresholds and limits for the analysis pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Row-count hint at or above which an unfiltered scan is flagged (R005)
    pub large_table_rows: u64,
    /// Row-count hint above which full scans start contributing cost weight
    pub scan_warn_rows: u64,
    /// Maximum number of columns in a suggested composite index
    pub max_index_columns: usize,
    /// Whether the index advisor runs at all
    pub suggest_indexes: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            large_table_rows: 100_000,
            scan_warn_rows: 10_000,
            max_index_columns: 4,
            suggest_indexes: true,
        }
    }
}

impl AuditConfig {
    /// Creates a config with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the large-table threshold
    pub fn with_large_table_rows(mut self, rows: u64) -> Self {
        self.large_table_rows = rows;
        self
    }

    /// Sets the full-scan warning threshold
    pub fn with_scan_warn_rows(mut self, rows: u64) -> Self {
        self.scan_warn_rows = rows;
        self
    }

    /// Sets the composite-index column cap
    pub fn with_max_index_columns(mut self, max: usize) -> Self {
        self.max_index_columns = max.max(1);
        self
    }

    /// Sets whether the index advisor runs
    pub fn with_suggest_indexes(mut self, suggest: bool) -> Self {
        self.suggest_indexes = suggest;
        self
    }
}
