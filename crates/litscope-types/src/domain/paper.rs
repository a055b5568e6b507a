use serde::{Deserialize, Serialize};

/// Sentinel written by the fetcher when a record carries no publication year.
pub const UNKNOWN_YEAR: &str = "Unknown";

/// Authors beyond this many are dropped at ingestion.
pub const MAX_AUTHORS: usize = 5;

/// Canonical PubMed landing page for a pmid.
pub fn pubmed_url(pmid: &str) -> String {
    format!("https://pubmed.ncbi.nlm.nih.gov/{}/", pmid)
}

/// One fetched literature record, keyed by PubMed identifier.
///
/// `keywords` and `mesh_terms` keep the order they were received in, but are
/// treated as sets when counting frequencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// PubMed identifier (primary key).
    pub pmid: String,
    pub title: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub journal: String,
    /// Four-digit year, empty, or [`UNKNOWN_YEAR`].
    #[serde(default)]
    pub pub_year: String,
    #[serde(default)]
    pub pub_date: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub mesh_terms: Vec<String>,
    #[serde(default)]
    pub doi: Option<String>,
    /// Name of the search that produced this record.
    #[serde(default)]
    pub search_strategy: String,
    /// Fetch timestamp (ISO 8601).
    #[serde(default)]
    pub fetch_date: String,
    #[serde(default)]
    pub pubmed_url: String,
    #[serde(default)]
    pub has_abstract: bool,
}

impl PaperRecord {
    /// Create a record with the derived fields filled in and everything else empty.
    pub fn new(pmid: impl Into<String>, title: impl Into<String>) -> Self {
        let pmid = pmid.into();
        let url = pubmed_url(&pmid);
        Self {
            pmid,
            title: title.into(),
            abstract_text: None,
            journal: String::new(),
            pub_year: String::new(),
            pub_date: String::new(),
            authors: Vec::new(),
            keywords: Vec::new(),
            mesh_terms: Vec::new(),
            doi: None,
            search_strategy: String::new(),
            fetch_date: String::new(),
            pubmed_url: url,
            has_abstract: false,
        }
    }

    /// Publication year, unless it is empty or the `"Unknown"` sentinel.
    pub fn known_year(&self) -> Option<&str> {
        match self.pub_year.as_str() {
            "" | UNKNOWN_YEAR => None,
            year => Some(year),
        }
    }

    pub fn abstract_str(&self) -> &str {
        self.abstract_text.as_deref().unwrap_or("")
    }

    /// Re-derive `pubmed_url` and `has_abstract`, and cap the author list.
    ///
    /// Applied on ingestion so records from any fetcher satisfy the same shape.
    pub fn normalize(&mut self) {
        self.pubmed_url = pubmed_url(&self.pmid);
        self.has_abstract = self
            .abstract_text
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty());
        self.authors.truncate(MAX_AUTHORS);
    }
}
