//! Storage encoding for paper columns.
//!
//! Multi-valued fields (authors, keywords, MeSH terms) are stored as JSON
//! arrays in TEXT columns. This module is the only place that knows that;
//! everything above the index works with `Vec<String>`.

use rusqlite::Row;
use rusqlite::types::ValueRef;

use crate::Result;

pub fn encode_terms(terms: &[String]) -> Result<String> {
    Ok(serde_json::to_string(terms)?)
}

/// Decode a stored term list.
///
/// NULL and empty text decode to an empty list. Malformed content also
/// decodes to an empty list (logged) so one bad row cannot fail a full read.
pub fn decode_terms(raw: Option<&str>, field: &str, pmid: &str) -> Vec<String> {
    let raw = match raw {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Vec::new(),
    };

    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(terms) => terms,
        Err(err) => {
            tracing::warn!(
                "Could not decode {} for pmid {}: {}; treating as empty",
                field,
                pmid,
                err
            );
            Vec::new()
        }
    }
}

/// Read a column as text, accepting integer and real storage.
///
/// Uploaded stores are not guaranteed to have used TEXT affinity for fields
/// like `pub_year`.
pub fn optional_text(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
    let value = match row.get_ref(idx)? {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    };
    Ok(value)
}

pub fn text(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(optional_text(row, idx)?.unwrap_or_default())
}

pub fn flag(row: &Row<'_>, idx: usize) -> rusqlite::Result<bool> {
    let value = match row.get_ref(idx)? {
        ValueRef::Null => false,
        ValueRef::Integer(i) => i != 0,
        ValueRef::Real(f) => f != 0.0,
        ValueRef::Text(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            matches!(text.trim().to_ascii_lowercase().as_str(), "1" | "true")
        }
        ValueRef::Blob(_) => false,
    };
    Ok(value)
}
