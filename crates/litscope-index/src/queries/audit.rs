use rusqlite::{Connection, params};

use crate::Result;
use crate::codec::text;
use crate::records::SearchAuditRecord;

pub fn insert(conn: &Connection, record: &SearchAuditRecord) -> Result<i64> {
    conn.execute(
        r#"
        INSERT INTO search_history (strategy_name, query, total_count, fetched_count,
                                    success_rate, search_date)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        params![
            &record.strategy_name,
            &record.query,
            record.total_count,
            record.fetched_count,
            record.success_rate,
            &record.search_date
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Audit rows, newest first.
pub fn list(conn: &Connection, limit: Option<usize>) -> Result<Vec<SearchAuditRecord>> {
    let limit_clause = limit.map(|l| format!("LIMIT {}", l)).unwrap_or_default();
    let query = format!(
        r#"
        SELECT id, strategy_name, query, total_count, fetched_count, success_rate, search_date
        FROM search_history
        ORDER BY id DESC
        {}
        "#,
        limit_clause
    );

    let mut stmt = conn.prepare(&query)?;
    let records = stmt
        .query_map([], |row| {
            Ok(SearchAuditRecord {
                id: row.get(0)?,
                strategy_name: text(row, 1)?,
                query: text(row, 2)?,
                total_count: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
                fetched_count: row.get::<_, Option<i64>>(4)?.unwrap_or(0),
                success_rate: row.get::<_, Option<f64>>(5)?.unwrap_or(0.0),
                search_date: text(row, 6)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    Ok(records)
}

pub fn count(conn: &Connection) -> Result<usize> {
    let count: i64 =
        conn.query_row("SELECT COUNT(*) FROM search_history", [], |row| row.get(0))?;

    Ok(count as usize)
}
