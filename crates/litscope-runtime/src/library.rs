use litscope_engine::{
    LibraryStats, Page, PaperQuery, TermField, TermFrequency, YearStrategyCount,
    compute_statistics, run_query, top_journals, top_n, year_strategy_breakdown,
};
use litscope_index::Database;
use litscope_types::PaperRecord;

use crate::Result;

/// Read-only analysis over one store.
///
/// Every call materializes the full record set; nothing is cached between
/// calls.
pub struct Library<'a> {
    db: &'a Database,
}

impl<'a> Library<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn papers(&self) -> Result<Vec<PaperRecord>> {
        Ok(self.db.fetch_all()?)
    }

    pub fn paper(&self, pmid: &str) -> Result<Option<PaperRecord>> {
        Ok(self.db.get_paper(pmid)?)
    }

    pub fn search(&self, query: &PaperQuery) -> Result<Page<PaperRecord>> {
        Ok(run_query(&self.papers()?, query))
    }

    pub fn statistics(&self) -> Result<LibraryStats> {
        Ok(compute_statistics(&self.papers()?))
    }

    pub fn top_keywords(&self, n: usize) -> Result<Vec<TermFrequency>> {
        Ok(top_n(&self.papers()?, TermField::Keywords, n))
    }

    pub fn top_mesh_terms(&self, n: usize) -> Result<Vec<TermFrequency>> {
        Ok(top_n(&self.papers()?, TermField::MeshTerms, n))
    }

    pub fn top_journals(&self, n: usize) -> Result<Vec<TermFrequency>> {
        Ok(top_journals(&self.papers()?, n))
    }

    pub fn year_strategy_breakdown(&self) -> Result<Vec<YearStrategyCount>> {
        Ok(year_strategy_breakdown(&self.papers()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use litscope_engine::{PaperFilter, SortKey};
    use litscope_testing::fixtures::sample_corpus;

    #[test]
    fn test_library_reads_through_store() {
        let db = Database::open_in_memory().unwrap();
        db.insert_many(&sample_corpus()).unwrap();
        let library = Library::new(&db);

        assert_eq!(library.papers().unwrap(), sample_corpus());
        assert_eq!(library.statistics().unwrap().total_papers, 6);
        assert_eq!(library.top_keywords(1).unwrap()[0].term, "circadian");
        assert_eq!(library.top_mesh_terms(10).unwrap().len(), 5);
        assert_eq!(library.top_journals(1).unwrap()[0].term, "Neuron");
        assert_eq!(library.year_strategy_breakdown().unwrap().len(), 4);

        let page = library
            .search(
                &PaperQuery::new()
                    .filter(PaperFilter::new().strategy("BMAL1 AND astrocyte"))
                    .sort(SortKey::YearDesc),
            )
            .unwrap();
        let pmids: Vec<&str> = page.items.iter().map(|p| p.pmid.as_str()).collect();
        assert_eq!(pmids, vec!["30000004", "30000002"]);
    }

    #[test]
    fn test_empty_store() {
        let db = Database::open_in_memory().unwrap();
        let library = Library::new(&db);

        assert!(library.papers().unwrap().is_empty());
        assert_eq!(library.statistics().unwrap(), LibraryStats::default());
        assert!(library.paper("1").unwrap().is_none());
    }
}
