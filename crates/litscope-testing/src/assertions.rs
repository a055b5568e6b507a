//! Custom assertions for litscope-specific validation.
//!
//! Provides high-level assertions that make tests more readable:
//! - Record identity and ordering checks
//! - Persisted history shape checks

use anyhow::{Context, Result};
use litscope_types::PaperRecord;
use serde_json::Value;

/// Assert that `papers` holds exactly `expected` pmids, in that order.
pub fn assert_pmids(papers: &[PaperRecord], expected: &[&str]) -> Result<()> {
    let actual: Vec<&str> = papers.iter().map(|p| p.pmid.as_str()).collect();

    if actual != expected {
        anyhow::bail!("Expected pmids {:?}, got {:?}", expected, actual);
    }

    Ok(())
}

/// Assert that every record satisfies `predicate`, naming the first that fails.
pub fn assert_all_papers<F>(papers: &[PaperRecord], what: &str, predicate: F) -> Result<()>
where
    F: Fn(&PaperRecord) -> bool,
{
    if let Some(paper) = papers.iter().find(|p| !predicate(p)) {
        anyhow::bail!("Paper {} does not satisfy: {}", paper.pmid, what);
    }

    Ok(())
}

/// Assert that a persisted history document is an array of `expected` entries,
/// each with the fields the history file format requires.
pub fn assert_history_entries(json: &Value, expected: usize) -> Result<()> {
    let entries = json
        .as_array()
        .context("Expected search history to be a JSON array")?;

    if entries.len() != expected {
        anyhow::bail!("Expected {} history entries, got {}", expected, entries.len());
    }

    for (i, entry) in entries.iter().enumerate() {
        for field in [
            "timestamp",
            "search_params",
            "result_count",
            "success_count",
            "success_rate",
        ] {
            if entry.get(field).is_none() {
                anyhow::bail!("History entry {} missing '{}'", i, field);
            }
        }
    }

    Ok(())
}
