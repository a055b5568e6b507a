use litscope_types::PaperRecord;
use serde::{Deserialize, Serialize};

use crate::filter::PaperFilter;
use crate::paginate::{Page, paginate};
use crate::sort::{SortKey, sort_records};

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Page sizes offered by the browser view.
pub const PAGE_SIZE_CHOICES: [usize; 4] = [10, 20, 50, 100];

/// A complete browse request: filter, then sort, then paginate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperQuery {
    #[serde(default)]
    pub filter: PaperFilter,
    #[serde(default)]
    pub sort: Option<SortKey>,
    pub page_size: usize,
    pub page: usize,
}

impl Default for PaperQuery {
    fn default() -> Self {
        Self {
            filter: PaperFilter::default(),
            sort: None,
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }
}

impl PaperQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: PaperFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort = Some(key);
        self
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

pub fn run_query(papers: &[PaperRecord], query: &PaperQuery) -> Page<PaperRecord> {
    let mut matched = query.filter.apply(papers);

    if let Some(key) = query.sort {
        sort_records(&mut matched, key);
    }

    paginate(&matched, query.page_size, query.page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use litscope_testing::fixtures::sample_corpus;

    #[test]
    fn test_default_query_is_first_page_unsorted() {
        let corpus = sample_corpus();
        let page = run_query(&corpus, &PaperQuery::new());

        assert_eq!(page.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(page.items, corpus);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_filter_then_sort_then_page() {
        let corpus = sample_corpus();
        let query = PaperQuery::new()
            .filter(PaperFilter::new().keyword("circadian"))
            .sort(SortKey::YearDesc)
            .page_size(2)
            .page(2);

        let page = run_query(&corpus, &query);
        assert_eq!(page.total_items, 4);
        assert_eq!(page.total_pages, 2);

        let pmids: Vec<&str> = page.items.iter().map(|p| p.pmid.as_str()).collect();
        assert_eq!(pmids, vec!["30000001", "30000002"]);
    }
}
