use litscope_types::PaperRecord;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

use crate::{Error, Result, queries, records::SearchAuditRecord, schema};

// Every operation materializes or counts in full. The store is sized for one
// researcher's result set, so filtering and aggregation happen in memory
// above this layer rather than in SQL.

pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Open (or create) the store at `db_path` and make sure the schema exists.
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path).map_err(|e| {
            Error::Query(format!(
                "Failed to open database {}: {}",
                db_path.display(),
                e
            ))
        })?;

        let db = Self {
            conn,
            path: Some(db_path.to_path_buf()),
        };
        db.init_schema()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn, path: None };
        db.init_schema()?;
        Ok(db)
    }

    pub fn init_schema(&self) -> Result<()> {
        schema::init_schema(&self.conn)
    }

    /// Backing file, or `None` for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // Paper operations

    pub fn insert_or_replace(&self, paper: &PaperRecord) -> Result<()> {
        queries::paper::insert_or_replace(&self.conn, paper)
    }

    pub fn insert_many(&self, papers: &[PaperRecord]) -> Result<usize> {
        queries::paper::insert_many(&self.conn, papers)
    }

    pub fn fetch_all(&self) -> Result<Vec<PaperRecord>> {
        queries::paper::fetch_all(&self.conn)
    }

    pub fn get_paper(&self, pmid: &str) -> Result<Option<PaperRecord>> {
        queries::paper::get(&self.conn, pmid)
    }

    pub fn count_papers(&self) -> Result<usize> {
        queries::paper::count(&self.conn)
    }

    // Search audit operations

    pub fn record_search(&self, record: &SearchAuditRecord) -> Result<i64> {
        queries::audit::insert(&self.conn, record)
    }

    pub fn list_searches(&self, limit: Option<usize>) -> Result<Vec<SearchAuditRecord>> {
        queries::audit::list(&self.conn, limit)
    }

    pub fn count_searches(&self) -> Result<usize> {
        queries::audit::count(&self.conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use litscope_testing::fixtures::PaperBuilder;

    #[test]
    fn test_schema_initialization() {
        let db = Database::open_in_memory().unwrap();

        assert_eq!(db.count_papers().unwrap(), 0);
        assert_eq!(db.count_searches().unwrap(), 0);
        assert!(db.path().is_none());
    }

    #[test]
    fn test_insert_and_fetch_paper() {
        let db = Database::open_in_memory().unwrap();

        let paper = PaperBuilder::new("31000001")
            .title("BMAL1 and the glymphatic system")
            .abstract_text("Clearance follows a circadian rhythm.")
            .journal("Neuron")
            .year("2020")
            .authors(&["Smith J", "Doe A"])
            .keywords(&["circadian", "glymphatic"])
            .mesh_terms(&["ARNTL Transcription Factors"])
            .doi("10.1000/xyz")
            .strategy("BMAL1 AND clearance")
            .build();

        db.insert_or_replace(&paper).unwrap();

        let fetched = db.get_paper("31000001").unwrap().unwrap();
        assert_eq!(fetched, paper);
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let db = Database::open_in_memory().unwrap();

        db.insert_or_replace(&PaperBuilder::new("1").title("first").build())
            .unwrap();
        db.insert_or_replace(&PaperBuilder::new("2").title("second").build())
            .unwrap();
        db.insert_or_replace(&PaperBuilder::new("1").title("first, revised").build())
            .unwrap();

        let papers = db.fetch_all().unwrap();
        assert_eq!(papers.len(), 2);
        assert_eq!(papers[0].pmid, "1");
        assert_eq!(papers[0].title, "first, revised");
        assert_eq!(papers[1].pmid, "2");
    }

    #[test]
    fn test_insert_many_counts_unique_pmids() {
        let db = Database::open_in_memory().unwrap();

        let papers: Vec<_> = ["10", "11", "10"]
            .iter()
            .map(|pmid| PaperBuilder::new(*pmid).build())
            .collect();

        assert_eq!(db.insert_many(&papers).unwrap(), 3);
        assert_eq!(db.count_papers().unwrap(), 2);
    }

    #[test]
    fn test_record_and_list_searches() {
        let db = Database::open_in_memory().unwrap();

        for i in 1..=3 {
            let record = SearchAuditRecord::new(
                format!("strategy {}", i),
                "BMAL1",
                40,
                i * 10,
                format!("2025-11-10T10:0{}:00", i),
            );
            db.record_search(&record).unwrap();
        }

        let searches = db.list_searches(None).unwrap();
        assert_eq!(searches.len(), 3);
        assert_eq!(searches[0].strategy_name, "strategy 3");
        assert_eq!(searches[0].success_rate, 75.0);

        let limited = db.list_searches(Some(1)).unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(db.count_searches().unwrap(), 3);
    }

    #[test]
    fn test_audit_rate_with_zero_total() {
        let record = SearchAuditRecord::new("empty", "nothing", 0, 0, "2025-11-10");
        assert_eq!(record.success_rate, 0.0);
    }
}
