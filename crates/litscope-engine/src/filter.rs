use litscope_types::PaperRecord;
use serde::{Deserialize, Serialize};

/// Strategy value that disables strategy filtering.
pub const ALL_STRATEGIES: &str = "all";

/// Inclusive publication year range.
///
/// Bounds are stored as four-digit strings so they compare the same way the
/// stored `pub_year` values do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: String,
    pub end: String,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self {
            start: format!("{:04}", start),
            end: format!("{:04}", end),
        }
    }

    /// Records with an empty or `"Unknown"` year never match.
    pub fn contains(&self, paper: &PaperRecord) -> bool {
        match paper.known_year() {
            Some(year) => self.start.as_str() <= year && year <= self.end.as_str(),
            None => false,
        }
    }
}

/// Conjunctive record filter. `Default` matches everything.
///
/// # Example
/// ```
/// use litscope_engine::{PaperFilter, YearRange};
///
/// let filter = PaperFilter::new()
///     .keyword("circadian")
///     .year_range(YearRange::new(2020, 2021));
/// assert!(filter.is_active());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperFilter {
    pub keyword: Option<String>,
    pub strategy: Option<String>,
    pub year_range: Option<YearRange>,
}

impl PaperFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }

    pub fn year_range(mut self, range: YearRange) -> Self {
        self.year_range = Some(range);
        self
    }

    /// Lowercased keyword, or `None` when it is absent or blank.
    ///
    /// Surrounding whitespace is part of the keyword and is not trimmed.
    fn needle(&self) -> Option<String> {
        self.keyword
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .map(str::to_lowercase)
    }

    fn strategy_constraint(&self) -> Option<&str> {
        self.strategy
            .as_deref()
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case(ALL_STRATEGIES))
    }

    /// True if any criterion would exclude records.
    pub fn is_active(&self) -> bool {
        self.needle().is_some() || self.strategy_constraint().is_some() || self.year_range.is_some()
    }

    pub fn matches(&self, paper: &PaperRecord) -> bool {
        if let Some(needle) = self.needle()
            && !matches_keyword(paper, &needle)
        {
            return false;
        }

        if let Some(strategy) = self.strategy_constraint()
            && paper.search_strategy != strategy
        {
            return false;
        }

        match &self.year_range {
            Some(range) => range.contains(paper),
            None => true,
        }
    }

    /// Matching records in source order.
    pub fn apply(&self, papers: &[PaperRecord]) -> Vec<PaperRecord> {
        papers.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

// `needle` must already be lowercase.
fn matches_keyword(paper: &PaperRecord, needle: &str) -> bool {
    paper.title.to_lowercase().contains(needle)
        || paper.abstract_str().to_lowercase().contains(needle)
        || paper
            .keywords
            .iter()
            .any(|k| k.to_lowercase().contains(needle))
}
