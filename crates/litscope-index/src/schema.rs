use rusqlite::{Connection, OpenFlags};
use std::path::Path;

use crate::Result;

// Tables are only ever created, never dropped or rebuilt: a store may be a
// file the user uploaded, and its rows are the only copy of their data.

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS papers (
            pmid TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            abstract TEXT,
            journal TEXT,
            pub_year TEXT,
            pub_date TEXT,
            authors TEXT,
            keywords TEXT,
            mesh_terms TEXT,
            doi TEXT,
            search_strategy TEXT,
            fetch_date TEXT,
            pubmed_url TEXT,
            has_abstract INTEGER
        );

        CREATE TABLE IF NOT EXISTS search_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            strategy_name TEXT,
            query TEXT,
            total_count INTEGER,
            fetched_count INTEGER,
            success_rate REAL,
            search_date TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_pub_year ON papers(pub_year);
        CREATE INDEX IF NOT EXISTS idx_strategy ON papers(search_strategy);
        CREATE INDEX IF NOT EXISTS idx_journal ON papers(journal);
        "#,
    )?;

    Ok(())
}

pub fn has_table(conn: &Connection, name: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Check that the file at `path` is a SQLite database with a `papers` table.
///
/// Opened read-only so a rejected candidate is never modified. Anything that
/// is not a readable SQLite file counts as invalid.
pub fn validate_schema(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }

    let conn = match Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    ) {
        Ok(conn) => conn,
        Err(err) => {
            tracing::debug!("Rejecting store {}: {}", path.display(), err);
            return false;
        }
    };

    match has_table(&conn, "papers") {
        Ok(found) => found,
        Err(err) => {
            tracing::debug!("Rejecting store {}: {}", path.display(), err);
            false
        }
    }
}
