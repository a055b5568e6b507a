use litscope_types::PaperRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Display orderings offered when browsing records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    YearDesc,
    YearAsc,
    #[serde(rename = "title")]
    TitleAsc,
    #[serde(rename = "journal")]
    JournalAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::YearDesc,
        SortKey::YearAsc,
        SortKey::TitleAsc,
        SortKey::JournalAsc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::YearDesc => "year_desc",
            SortKey::YearAsc => "year_asc",
            SortKey::TitleAsc => "title",
            SortKey::JournalAsc => "journal",
        }
    }

    fn compare(&self, a: &PaperRecord, b: &PaperRecord) -> Ordering {
        match self {
            SortKey::YearDesc => b.pub_year.cmp(&a.pub_year),
            SortKey::YearAsc => a.pub_year.cmp(&b.pub_year),
            SortKey::TitleAsc => a.title.cmp(&b.title),
            SortKey::JournalAsc => a.journal.cmp(&b.journal),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSortKeyError(String);

impl fmt::Display for ParseSortKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown sort key '{}' (expected one of: year_desc, year_asc, title, journal)",
            self.0
        )
    }
}

impl std::error::Error for ParseSortKeyError {}

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "year_desc" => Ok(SortKey::YearDesc),
            "year_asc" => Ok(SortKey::YearAsc),
            "title" | "title_asc" => Ok(SortKey::TitleAsc),
            "journal" | "journal_asc" => Ok(SortKey::JournalAsc),
            _ => Err(ParseSortKeyError(s.to_string())),
        }
    }
}

/// Stable in-place sort; equal keys keep their relative order.
///
/// Years compare as strings, so `"Unknown"` sorts above every digit year and
/// an empty year sorts below.
pub fn sort_records(papers: &mut [PaperRecord], key: SortKey) {
    papers.sort_by(|a, b| key.compare(a, b));
}
