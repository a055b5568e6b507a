use chrono::{SecondsFormat, Utc};
use litscope_index::{Database, validate_schema};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

const STORE_PREFIX: &str = "litscope_";
const UPLOAD_PREFIX: &str = "litscope_uploaded_";
const STORE_SUFFIX: &str = ".db";

/// The physical store file a session is bound to.
///
/// `token` changes on every rebinding so callers can drop cached views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionHandle {
    pub path: PathBuf,
    pub token: String,
}

impl SessionHandle {
    fn bind(path: PathBuf) -> Self {
        Self {
            path,
            token: Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatabaseInfo {
    pub exists: bool,
    pub paper_count: usize,
    pub search_count: usize,
    /// File size in bytes.
    pub size: u64,
    pub error: Option<String>,
}

impl DatabaseInfo {
    /// Size in megabytes, rounded to two decimals.
    pub fn size_mb(&self) -> f64 {
        (self.size as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0
    }
}

/// Decides which store file the current session reads and writes.
///
/// Owns the existence of the file, not its contents. Files are created in
/// `store_dir`; a replaced file is left on disk.
pub struct SessionDataLifecycle {
    store_dir: PathBuf,
    handle: Option<SessionHandle>,
}

impl SessionDataLifecycle {
    pub fn new(store_dir: impl Into<PathBuf>) -> Self {
        Self {
            store_dir: store_dir.into(),
            handle: None,
        }
    }

    /// Store files go to the system temp directory.
    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir())
    }

    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    pub fn handle(&self) -> Option<&SessionHandle> {
        self.handle.as_ref()
    }

    fn live_handle(&self) -> Option<&SessionHandle> {
        self.handle.as_ref().filter(|h| h.path.exists())
    }

    pub fn has_database(&self) -> bool {
        self.live_handle().is_some()
    }

    /// The bound store, creating one if there is none or its file is gone.
    pub fn ensure(&mut self) -> Result<SessionHandle> {
        match self.live_handle() {
            Some(handle) => Ok(handle.clone()),
            None => self.create(),
        }
    }

    /// Create a fresh empty store and bind to it.
    pub fn create(&mut self) -> Result<SessionHandle> {
        let path = self.new_store_file(STORE_PREFIX)?;

        if let Err(err) = Database::open(&path) {
            remove_quietly(&path);
            return Err(err.into());
        }

        tracing::info!("Created session store {}", path.display());
        Ok(self.bind(path))
    }

    /// Replace the session store with `bytes`.
    ///
    /// Returns false, and keeps the current store, when the bytes are not a
    /// store with a `papers` table. The previous file is not deleted.
    pub fn upload(&mut self, bytes: &[u8]) -> bool {
        match self.try_upload(bytes) {
            Ok(handle) => {
                tracing::info!("Uploaded session store {}", handle.path.display());
                true
            }
            Err(err) => {
                tracing::warn!("Rejected uploaded store: {}", err);
                false
            }
        }
    }

    fn try_upload(&mut self, bytes: &[u8]) -> Result<SessionHandle> {
        let path = self.new_store_file(UPLOAD_PREFIX)?;

        if let Err(err) = accept_candidate(&path, bytes) {
            remove_quietly(&path);
            return Err(err);
        }

        Ok(self.bind(path))
    }

    /// Raw bytes of the bound store.
    pub fn download(&self) -> Option<Vec<u8>> {
        let handle = self.live_handle()?;

        match std::fs::read(&handle.path) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                tracing::warn!("Failed to read {}: {}", handle.path.display(), err);
                None
            }
        }
    }

    pub fn info(&self) -> DatabaseInfo {
        let Some(handle) = self.live_handle() else {
            return DatabaseInfo::default();
        };

        match describe(&handle.path) {
            Ok(info) => info,
            Err(err) => DatabaseInfo {
                error: Some(err.to_string()),
                ..DatabaseInfo::default()
            },
        }
    }

    /// Delete the bound store file and unbind.
    pub fn clear(&mut self) {
        if let Some(handle) = self.handle.take() {
            remove_quietly(&handle.path);
            tracing::info!("Cleared session store {}", handle.path.display());
        }
    }

    /// Open a connection to the bound store, creating one if needed.
    pub fn open_store(&mut self) -> Result<Database> {
        let handle = self.ensure()?;
        Ok(Database::open(&handle.path)?)
    }

    fn bind(&mut self, path: PathBuf) -> SessionHandle {
        let handle = SessionHandle::bind(path);
        self.handle = Some(handle.clone());
        handle
    }

    fn new_store_file(&self, prefix: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.store_dir)?;

        let file = tempfile::Builder::new()
            .prefix(prefix)
            .suffix(STORE_SUFFIX)
            .tempfile_in(&self.store_dir)?;
        let (_, path) = file.keep()?;
        Ok(path)
    }
}

fn accept_candidate(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);

    if !validate_schema(path) {
        return Err(Error::InvalidOperation(
            "file is not a litscope store (no papers table)".to_string(),
        ));
    }

    // Adds search_history to stores that predate it. Also indexes journal,
    // pub_year and search_strategy, so papers must carry those columns.
    Database::open(path)?;
    Ok(())
}

fn describe(path: &Path) -> Result<DatabaseInfo> {
    let db = Database::open(path)?;
    let size = std::fs::metadata(path)?.len();

    Ok(DatabaseInfo {
        exists: true,
        paper_count: db.count_papers()?,
        search_count: db.count_searches()?,
        size,
        error: None,
    })
}

fn remove_quietly(path: &Path) {
    if let Err(err) = std::fs::remove_file(path) {
        tracing::warn!("Failed to remove {}: {}", path.display(), err);
    }
}
