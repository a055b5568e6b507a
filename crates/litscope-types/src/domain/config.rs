use serde::{Deserialize, Serialize};

/// PubMed E-utilities credentials and request defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PubMedConfig {
    pub email: String,
    pub api_key: String,
    pub max_results: u32,
    pub batch_size: u32,
    /// `relevance`, `pub_date`, ...
    pub sort_by: String,
}

impl Default for PubMedConfig {
    fn default() -> Self {
        Self {
            email: String::new(),
            api_key: String::new(),
            max_results: 100,
            batch_size: 20,
            sort_by: "relevance".to_string(),
        }
    }
}

impl PubMedConfig {
    /// Both credentials are present.
    pub fn is_valid(&self) -> bool {
        !self.email.is_empty() && !self.api_key.is_empty()
    }

    /// One `*` per character of the API key, for display.
    pub fn masked_api_key(&self) -> String {
        "*".repeat(self.api_key.chars().count())
    }

    pub fn apply(&mut self, update: ConfigUpdate) {
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(api_key) = update.api_key {
            self.api_key = api_key;
        }
        if let Some(max_results) = update.max_results {
            self.max_results = max_results;
        }
        if let Some(batch_size) = update.batch_size {
            self.batch_size = batch_size;
        }
        if let Some(sort_by) = update.sort_by {
            self.sort_by = sort_by;
        }
    }
}

/// Partial update of [`PubMedConfig`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub email: Option<String>,
    pub api_key: Option<String>,
    pub max_results: Option<u32>,
    pub batch_size: Option<u32>,
    pub sort_by: Option<String>,
}

impl ConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }
}
