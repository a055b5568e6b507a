//! Whole-file JSON persistence.
//!
//! Every write goes to a temp file in the target's directory and is renamed
//! over the target, so readers see either the old or the new document. There
//! is no locking between processes; the last writer wins.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::Result;

/// A fully written document waiting to replace its target.
pub struct StagedFile {
    file: NamedTempFile,
    target: PathBuf,
}

impl StagedFile {
    pub fn commit(self) -> Result<()> {
        self.file.persist(&self.target)?;
        Ok(())
    }
}

pub fn stage_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<StagedFile> {
    let content = serde_json::to_string_pretty(value)?;
    stage_bytes(path, content.as_bytes())
}

pub fn stage_bytes(path: &Path, content: &[u8]) -> Result<StagedFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let mut file = NamedTempFile::new_in(&dir)?;
    file.write_all(content)?;
    file.as_file().sync_all()?;

    Ok(StagedFile {
        file,
        target: path.to_path_buf(),
    })
}

pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    stage_json(path, value)?.commit()
}

/// Read and parse a JSON document; `Ok(None)` when the file does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&content)?))
}
