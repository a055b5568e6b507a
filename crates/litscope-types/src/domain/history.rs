use serde::{Deserialize, Serialize};

use super::SearchParams;

/// Upper bound on retained search-history entries.
pub const MAX_HISTORY_ENTRIES: usize = 100;

/// Percentage of requested records that were fetched, to one decimal.
///
/// A search with no results reports `"0%"` instead of dividing by zero.
pub fn format_success_rate(success_count: u64, result_count: u64) -> String {
    if result_count == 0 {
        return "0%".to_string();
    }
    let rate = success_count as f64 / result_count as f64 * 100.0;
    format!("{:.1}%", rate)
}

/// One executed search, as kept in the persisted history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    /// Creation time (RFC 3339).
    pub timestamp: String,
    pub search_params: SearchParams,
    pub result_count: u64,
    pub success_count: u64,
    pub success_rate: String,
}

impl SearchHistoryEntry {
    pub fn new(search_params: SearchParams, result_count: u64, success_count: u64) -> Self {
        Self::at(
            chrono::Local::now().to_rfc3339(),
            search_params,
            result_count,
            success_count,
        )
    }

    /// Build an entry with an explicit timestamp.
    pub fn at(
        timestamp: impl Into<String>,
        search_params: SearchParams,
        result_count: u64,
        success_count: u64,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            search_params,
            result_count,
            success_count,
            success_rate: format_success_rate(success_count, result_count),
        }
    }
}
