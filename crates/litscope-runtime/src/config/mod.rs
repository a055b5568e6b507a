mod resolver;

pub use resolver::{
    CredentialKey, CredentialSource, EnvFileSource, MapSecretStore, SecretStore,
    SecretStoreSource, fill_credentials,
};

use litscope_types::{ConfigUpdate, PubMedConfig, SearchHistoryEntry, SearchParams};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::history::SearchHistory;
use crate::paths::resolve_config_dir;
use crate::storage::{StagedFile, read_json, stage_bytes, stage_json, write_json_atomic};
use crate::{Error, Result};

pub const SETTINGS_FILE: &str = "settings.json";
pub const HISTORY_FILE: &str = "search_history.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    pubmed: PubMedConfig,
}

/// Portable snapshot written by [`ConfigManager::export_config`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigExport {
    pub pubmed_config: PubMedConfig,
    #[serde(default)]
    pub search_history: Vec<SearchHistoryEntry>,
}

/// Owns the PubMed settings and the search history log of one config directory.
///
/// Every mutation is persisted before it becomes visible in memory, so a
/// failed write leaves the manager exactly as it was.
pub struct ConfigManager {
    config_dir: PathBuf,
    config: PubMedConfig,
    history: SearchHistory,
}

impl ConfigManager {
    /// Open `config_dir` without any credential fallback.
    pub fn open(config_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_sources(config_dir, Vec::new())
    }

    /// Open `config_dir`, filling empty credentials from `sources` in order.
    pub fn open_with_sources(
        config_dir: impl Into<PathBuf>,
        sources: Vec<Box<dyn CredentialSource>>,
    ) -> Result<Self> {
        let config_dir = config_dir.into();
        std::fs::create_dir_all(&config_dir)?;

        let mut config = load_settings(&config_dir.join(SETTINGS_FILE));
        if !config.is_valid() {
            fill_credentials(&mut config, &sources);
        }

        let history = SearchHistory::load(&config_dir.join(HISTORY_FILE));

        Ok(Self {
            config_dir,
            config,
            history,
        })
    }

    /// Open the resolved default config directory with the host secret store
    /// (if any) followed by the default env files.
    pub fn open_default(secrets: Option<Box<dyn CredentialSource>>) -> Result<Self> {
        let config_dir = resolve_config_dir(None)?;

        let mut sources: Vec<Box<dyn CredentialSource>> = Vec::new();
        sources.extend(secrets);
        sources.push(Box::new(EnvFileSource::default_for(&config_dir)));

        Self::open_with_sources(config_dir, sources)
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    pub fn history_path(&self) -> PathBuf {
        self.config_dir.join(HISTORY_FILE)
    }

    pub fn config(&self) -> &PubMedConfig {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_valid()
    }

    /// Apply the given fields and persist the whole config.
    pub fn update(&mut self, update: ConfigUpdate) -> Result<()> {
        let mut updated = self.config.clone();
        updated.apply(update);

        write_json_atomic(&self.settings_path(), &settings_document(&updated))?;
        self.config = updated;

        tracing::info!("Saved PubMed settings to {}", self.settings_path().display());
        Ok(())
    }

    pub fn history(&self) -> &[SearchHistoryEntry] {
        self.history.entries()
    }

    pub fn recent_searches(&self, n: usize) -> &[SearchHistoryEntry] {
        self.history.recent(n)
    }

    pub fn add_history(&mut self, entry: SearchHistoryEntry) -> Result<()> {
        let mut updated = self.history.clone();
        updated.push(entry);
        self.replace_history(updated)
    }

    /// Record a finished search with the current time.
    pub fn record_search(
        &mut self,
        params: SearchParams,
        result_count: u64,
        success_count: u64,
    ) -> Result<()> {
        self.add_history(SearchHistoryEntry::new(params, result_count, success_count))
    }

    pub fn clear_history(&mut self) -> Result<()> {
        self.replace_history(SearchHistory::new())
    }

    fn replace_history(&mut self, history: SearchHistory) -> Result<()> {
        write_json_atomic(&self.history_path(), history.entries())?;
        self.history = history;
        Ok(())
    }

    pub fn export(&self) -> ConfigExport {
        ConfigExport {
            pubmed_config: self.config.clone(),
            search_history: self.history.entries().to_vec(),
        }
    }

    /// Write the config and full history to `path` as one JSON document.
    pub fn export_config(&self, path: &Path) -> Result<()> {
        write_json_atomic(path, &self.export())?;
        tracing::info!("Exported configuration to {}", path.display());
        Ok(())
    }

    /// Replace config (and history, if the document has one) from an export.
    ///
    /// The document must contain `pubmed_config`. Nothing on disk or in memory
    /// changes unless the document parses and both files are committed; if
    /// the history commit fails, the previous settings file is put back.
    pub fn import_config(&mut self, path: &Path) -> Result<()> {
        let document: serde_json::Value = read_json(path)?.ok_or_else(|| {
            Error::Config(format!("Import file not found: {}", path.display()))
        })?;

        let pubmed_config = document.get("pubmed_config").ok_or_else(|| {
            Error::Config(format!(
                "Import file {} has no 'pubmed_config' section",
                path.display()
            ))
        })?;
        let config: PubMedConfig = serde_json::from_value(pubmed_config.clone())?;

        let history = match document.get("search_history") {
            Some(entries) => Some(SearchHistory::from_entries(serde_json::from_value(
                entries.clone(),
            )?)),
            None => None,
        };

        let staged_settings = stage_json(&self.settings_path(), &settings_document(&config))?;
        let staged_history = match &history {
            Some(history) => Some(stage_json(&self.history_path(), history.entries())?),
            None => None,
        };

        let previous_settings = match std::fs::read(self.settings_path()) {
            Ok(bytes) => Some(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => return Err(err.into()),
        };

        staged_settings.commit()?;
        if let Some(staged) = staged_history
            && let Err(err) = staged.commit()
        {
            self.restore_settings(previous_settings);
            return Err(err);
        }

        self.config = config;
        if let Some(history) = history {
            self.history = history;
        }

        tracing::info!("Imported configuration from {}", path.display());
        Ok(())
    }

    /// Put `settings.json` back to `previous` (absent when `None`) after a
    /// partially committed import.
    fn restore_settings(&self, previous: Option<Vec<u8>>) {
        let path = self.settings_path();
        let restored = match previous {
            Some(bytes) => stage_bytes(&path, &bytes).and_then(StagedFile::commit),
            None => std::fs::remove_file(&path).map_err(Error::from),
        };

        if let Err(err) = restored {
            tracing::warn!(
                "Failed to restore {} after aborted import: {}",
                path.display(),
                err
            );
        }
    }
}

fn settings_document(config: &PubMedConfig) -> SettingsFile {
    SettingsFile {
        pubmed: config.clone(),
    }
}

/// Settings from disk, or defaults when the file is missing or unreadable.
fn load_settings(path: &Path) -> PubMedConfig {
    match read_json::<SettingsFile>(path) {
        Ok(Some(settings)) => settings.pubmed,
        Ok(None) => PubMedConfig::default(),
        Err(err) => {
            tracing::warn!(
                "Failed to load settings from {}: {}; using defaults",
                path.display(),
                err
            );
            PubMedConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_empty_dir_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::open(temp_dir.path().join("config")).unwrap();

        assert_eq!(manager.config(), &PubMedConfig::default());
        assert!(!manager.is_configured());
        assert!(manager.history().is_empty());
        assert!(manager.config_dir().is_dir());
    }

    #[test]
    fn test_corrupt_settings_fall_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(SETTINGS_FILE), "{ not json").unwrap();

        let manager = ConfigManager::open(temp_dir.path()).unwrap();
        assert_eq!(manager.config(), &PubMedConfig::default());
    }

    #[test]
    fn test_update_persists_only_given_fields() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = ConfigManager::open(temp_dir.path()).unwrap();

        manager
            .update(ConfigUpdate::new().email("me@lab.org").batch_size(50))
            .unwrap();

        let reopened = ConfigManager::open(temp_dir.path()).unwrap();
        assert_eq!(reopened.config().email, "me@lab.org");
        assert_eq!(reopened.config().batch_size, 50);
        assert_eq!(reopened.config().max_results, 100);
        assert_eq!(reopened.config().sort_by, "relevance");
    }

    #[test]
    fn test_settings_file_shape() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = ConfigManager::open(temp_dir.path()).unwrap();
        manager
            .update(ConfigUpdate::new().email("me@lab.org").api_key("k"))
            .unwrap();

        let content = std::fs::read_to_string(manager.settings_path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();

        let sections: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(sections, vec!["pubmed"]);
        assert_eq!(json["pubmed"]["email"], "me@lab.org");
        assert_eq!(json["pubmed"]["api_key"], "k");
        assert_eq!(json["pubmed"]["batch_size"], 20);
        assert_eq!(json["pubmed"]["max_results"], 100);
        assert_eq!(json["pubmed"]["sort_by"], "relevance");
    }

    #[test]
    fn test_record_search_prepends() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = ConfigManager::open(temp_dir.path()).unwrap();

        manager
            .record_search(SearchParams::new("first"), 10, 5)
            .unwrap();
        manager
            .record_search(SearchParams::new("second"), 0, 0)
            .unwrap();

        let recent = manager.recent_searches(1);
        assert_eq!(recent[0].search_params.query, "second");
        assert_eq!(recent[0].success_rate, "0%");
        assert_eq!(manager.history()[1].success_rate, "50.0%");
    }

    #[test]
    fn test_clear_history_persists() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = ConfigManager::open(temp_dir.path()).unwrap();
        manager.record_search(SearchParams::new("q"), 1, 1).unwrap();

        manager.clear_history().unwrap();

        let reopened = ConfigManager::open(temp_dir.path()).unwrap();
        assert!(reopened.history().is_empty());
        assert_eq!(std::fs::read_to_string(manager.history_path()).unwrap(), "[]");
    }
}
