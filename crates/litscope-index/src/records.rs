/// One row of the store's own `search_history` audit table.
///
/// Independent of the JSON history kept next to the configuration: this log
/// travels with the store file when it is downloaded or uploaded.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SearchAuditRecord {
    /// Row id, assigned by the store.
    pub id: Option<i64>,
    /// Display name of the search.
    pub strategy_name: String,
    pub query: String,
    /// Hits reported by the remote database.
    pub total_count: i64,
    /// Records fetched and stored.
    pub fetched_count: i64,
    /// Percentage in `[0, 100]`.
    pub success_rate: f64,
    /// When the search ran (ISO 8601 timestamp).
    pub search_date: String,
}

impl SearchAuditRecord {
    pub fn new(
        strategy_name: impl Into<String>,
        query: impl Into<String>,
        total_count: i64,
        fetched_count: i64,
        search_date: impl Into<String>,
    ) -> Self {
        let success_rate = if total_count > 0 {
            fetched_count as f64 / total_count as f64 * 100.0
        } else {
            0.0
        };

        Self {
            id: None,
            strategy_name: strategy_name.into(),
            query: query.into(),
            total_count,
            fetched_count,
            success_rate,
            search_date: search_date.into(),
        }
    }
}
