// Runtime layer - configuration, history, session store lifecycle, ingestion
// Composes the record store (index) with the pure engine for the presentation layer

pub mod config;
mod error;
pub mod history;
pub mod ingest;
pub mod library;
pub mod paths;
pub mod session;
mod storage;

pub use config::{
    ConfigExport, ConfigManager, CredentialKey, CredentialSource, EnvFileSource, MapSecretStore,
    SecretStore, SecretStoreSource,
};
pub use error::{Error, Result};
pub use history::SearchHistory;
pub use ingest::{IngestProgress, IngestReport, IngestService, LiteratureSearch};
pub use library::Library;
pub use paths::resolve_config_dir;
pub use session::{DatabaseInfo, SessionDataLifecycle, SessionHandle};
