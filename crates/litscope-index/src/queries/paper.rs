use litscope_types::PaperRecord;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::Result;
use crate::codec::{decode_terms, encode_terms, flag, optional_text, text};

const SELECT_COLUMNS: &str = r#"
    SELECT pmid, title, abstract, journal, pub_year, pub_date, authors, keywords,
           mesh_terms, doi, search_strategy, fetch_date, pubmed_url, has_abstract
    FROM papers
"#;

pub fn insert_or_replace(conn: &Connection, paper: &PaperRecord) -> Result<()> {
    let authors = encode_terms(&paper.authors)?;
    let keywords = encode_terms(&paper.keywords)?;
    let mesh_terms = encode_terms(&paper.mesh_terms)?;

    conn.execute(
        r#"
        INSERT INTO papers (pmid, title, abstract, journal, pub_year, pub_date, authors,
                            keywords, mesh_terms, doi, search_strategy, fetch_date,
                            pubmed_url, has_abstract)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
        ON CONFLICT(pmid) DO UPDATE SET
            title = ?2,
            abstract = ?3,
            journal = ?4,
            pub_year = ?5,
            pub_date = ?6,
            authors = ?7,
            keywords = ?8,
            mesh_terms = ?9,
            doi = ?10,
            search_strategy = ?11,
            fetch_date = ?12,
            pubmed_url = ?13,
            has_abstract = ?14
        "#,
        params![
            &paper.pmid,
            &paper.title,
            &paper.abstract_text,
            &paper.journal,
            &paper.pub_year,
            &paper.pub_date,
            authors,
            keywords,
            mesh_terms,
            &paper.doi,
            &paper.search_strategy,
            &paper.fetch_date,
            &paper.pubmed_url,
            paper.has_abstract,
        ],
    )?;

    Ok(())
}

/// Upsert a batch in one transaction; either every record lands or none does.
pub fn insert_many(conn: &Connection, papers: &[PaperRecord]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    for paper in papers {
        insert_or_replace(&tx, paper)?;
    }
    tx.commit()?;

    Ok(papers.len())
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<PaperRecord> {
    let pmid = text(row, 0)?;
    let authors = decode_terms(optional_text(row, 6)?.as_deref(), "authors", &pmid);
    let keywords = decode_terms(optional_text(row, 7)?.as_deref(), "keywords", &pmid);
    let mesh_terms = decode_terms(optional_text(row, 8)?.as_deref(), "mesh_terms", &pmid);

    Ok(PaperRecord {
        title: text(row, 1)?,
        abstract_text: optional_text(row, 2)?,
        journal: text(row, 3)?,
        pub_year: text(row, 4)?,
        pub_date: text(row, 5)?,
        authors,
        keywords,
        mesh_terms,
        doi: optional_text(row, 9)?,
        search_strategy: text(row, 10)?,
        fetch_date: text(row, 11)?,
        pubmed_url: text(row, 12)?,
        has_abstract: flag(row, 13)?,
        pmid,
    })
}

/// Every stored paper, in insertion order.
pub fn fetch_all(conn: &Connection) -> Result<Vec<PaperRecord>> {
    let sql = format!("{} ORDER BY rowid", SELECT_COLUMNS);
    let mut stmt = conn.prepare(&sql)?;

    let papers = stmt
        .query_map([], map_row)?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    Ok(papers)
}

pub fn get(conn: &Connection, pmid: &str) -> Result<Option<PaperRecord>> {
    let sql = format!("{} WHERE pmid = ?1", SELECT_COLUMNS);
    let paper = conn.query_row(&sql, [pmid], map_row).optional()?;

    Ok(paper)
}

pub fn count(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM papers", [], |row| row.get(0))?;

    Ok(count as usize)
}
