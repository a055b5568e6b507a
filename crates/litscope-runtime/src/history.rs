use litscope_types::{MAX_HISTORY_ENTRIES, SearchHistoryEntry};
use std::path::Path;

use crate::storage::read_json;

/// Search log kept next to the configuration, newest first.
///
/// Never holds more than [`MAX_HISTORY_ENTRIES`]; adding beyond the cap
/// evicts the oldest entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHistory {
    entries: Vec<SearchHistoryEntry>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap entries that are already newest first, dropping any past the cap.
    pub fn from_entries(mut entries: Vec<SearchHistoryEntry>) -> Self {
        entries.truncate(MAX_HISTORY_ENTRIES);
        Self { entries }
    }

    /// Load from disk. A missing file is an empty history; an unreadable one
    /// is logged and also treated as empty.
    pub fn load(path: &Path) -> Self {
        match read_json::<Vec<SearchHistoryEntry>>(path) {
            Ok(Some(entries)) => Self::from_entries(entries),
            Ok(None) => Self::new(),
            Err(err) => {
                tracing::warn!(
                    "Failed to load search history from {}: {}; starting empty",
                    path.display(),
                    err
                );
                Self::new()
            }
        }
    }

    pub fn push(&mut self, entry: SearchHistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY_ENTRIES);
    }

    pub fn entries(&self) -> &[SearchHistoryEntry] {
        &self.entries
    }

    /// Up to `n` most recent entries.
    pub fn recent(&self, n: usize) -> &[SearchHistoryEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use litscope_types::SearchParams;
    use tempfile::TempDir;

    fn entry(i: u64) -> SearchHistoryEntry {
        SearchHistoryEntry::at(
            format!("2025-11-10T10:{:02}:00+00:00", i % 60),
            SearchParams::new(format!("query {}", i)),
            10,
            i % 10,
        )
    }

    #[test]
    fn test_push_prepends_and_caps() {
        let mut history = SearchHistory::new();
        for i in 1..=105 {
            history.push(entry(i));
        }

        assert_eq!(history.len(), MAX_HISTORY_ENTRIES);
        assert_eq!(history.entries()[0].search_params.query, "query 105");
        assert_eq!(history.entries()[99].search_params.query, "query 6");
        assert!(
            history
                .entries()
                .iter()
                .all(|e| e.search_params.query != "query 5")
        );
    }

    #[test]
    fn test_recent_is_bounded() {
        let history = SearchHistory::from_entries((1..=3).map(entry).collect());

        assert_eq!(history.recent(2).len(), 2);
        assert_eq!(history.recent(10).len(), 3);
        assert!(history.recent(0).is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("search_history.json");
        std::fs::write(&path, "[{\"timestamp\": ").unwrap();

        assert!(SearchHistory::load(&path).is_empty());
        assert!(SearchHistory::load(&temp_dir.path().join("missing.json")).is_empty());
    }
}
