use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::PaperRecord;

fn default_name() -> String {
    "Custom Search".to_string()
}

fn default_max_results() -> u32 {
    100
}

fn default_sort_by() -> String {
    "relevance".to_string()
}

/// Parameters of one literature search, as handed to the external client
/// and embedded in every history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub query: String,
    /// Display name; becomes the `search_strategy` tag of fetched records.
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    /// Lower date bound, `YYYY/MM/DD`.
    #[serde(default)]
    pub min_date: Option<String>,
    /// Upper date bound, `YYYY/MM/DD`.
    #[serde(default)]
    pub max_date: Option<String>,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_max_results")]
    pub retmax: u32,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            name: default_name(),
            max_results: default_max_results(),
            min_date: None,
            max_date: None,
            sort_by: default_sort_by(),
            retmax: default_max_results(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets both `max_results` and `retmax`.
    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self.retmax = max_results;
        self
    }

    pub fn date_range(mut self, min_date: impl Into<String>, max_date: impl Into<String>) -> Self {
        self.min_date = Some(min_date.into());
        self.max_date = Some(max_date.into());
        self
    }

    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = sort_by.into();
        self
    }

    /// Render the E-utilities `esearch` parameter set.
    ///
    /// Date bounds are only included when non-empty.
    pub fn to_esearch_params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert("db".to_string(), "pubmed".to_string());
        params.insert("term".to_string(), self.query.clone());
        params.insert(
            "retmax".to_string(),
            self.retmax.min(self.max_results).to_string(),
        );
        params.insert("sort".to_string(), self.sort_by.clone());

        if let Some(min_date) = self.min_date.as_deref().filter(|d| !d.is_empty()) {
            params.insert("mindate".to_string(), min_date.to_string());
        }
        if let Some(max_date) = self.max_date.as_deref().filter(|d| !d.is_empty()) {
            params.insert("maxdate".to_string(), max_date.to_string());
        }

        params
    }
}

/// Result reported by the external literature-search client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub success: bool,
    /// Hits reported by the remote database.
    pub total_count: u64,
    /// Records actually fetched.
    pub fetched_count: u64,
    pub success_rate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_files: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Fetched records, ready for ingestion.
    #[serde(default)]
    pub papers: Vec<PaperRecord>,
}

impl SearchOutcome {
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            success_rate: "0%".to_string(),
            error: Some(error.into()),
            ..Default::default()
        }
    }
}
