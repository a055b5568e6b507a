//! Credential fallback sources.
//!
//! When the settings file leaves the email or API key empty, the manager asks
//! an ordered list of [`CredentialSource`]s. Sources are consulted lazily and
//! only for fields that are still empty; the first non-empty answer wins.

use litscope_types::PubMedConfig;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::Result;

/// Credential fields that can come from outside the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKey {
    Email,
    ApiKey,
}

impl CredentialKey {
    pub const ALL: [CredentialKey; 2] = [CredentialKey::Email, CredentialKey::ApiKey];

    /// Key name used by secret stores and env files.
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialKey::Email => "pubmed_email",
            CredentialKey::ApiKey => "api_key",
        }
    }

    fn is_set(&self, config: &PubMedConfig) -> bool {
        match self {
            CredentialKey::Email => !config.email.is_empty(),
            CredentialKey::ApiKey => !config.api_key.is_empty(),
        }
    }

    fn set(&self, config: &mut PubMedConfig, value: String) {
        match self {
            CredentialKey::Email => config.email = value,
            CredentialKey::ApiKey => config.api_key = value,
        }
    }
}

pub trait CredentialSource {
    /// Short name for log messages.
    fn name(&self) -> &str;

    fn lookup(&self, key: CredentialKey) -> Result<Option<String>>;
}

/// Host-provided secret storage (keychain, deployment secrets, ...).
pub trait SecretStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
}

/// In-memory secret store, for hosts that inject secrets at startup.
#[derive(Debug, Clone, Default)]
pub struct MapSecretStore {
    values: BTreeMap<String, String>,
}

impl MapSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl SecretStore for MapSecretStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }
}

pub struct SecretStoreSource<S> {
    store: S,
}

impl<S: SecretStore> SecretStoreSource<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: SecretStore> CredentialSource for SecretStoreSource<S> {
    fn name(&self) -> &str {
        "secret store"
    }

    fn lookup(&self, key: CredentialKey) -> Result<Option<String>> {
        self.store.get(key.as_str())
    }
}

/// `key: value` file, read from the first candidate path that exists.
///
/// Blank lines and lines starting with `#` are ignored, as are lines without
/// a colon. Later candidates are not consulted once one exists, even if it
/// lacks the requested key.
pub struct EnvFileSource {
    candidates: Vec<PathBuf>,
}

impl EnvFileSource {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// Component-local file first, then the project-root file.
    pub fn local_then_root(local: impl Into<PathBuf>, root: impl Into<PathBuf>) -> Self {
        Self::new(vec![local.into(), root.into()])
    }

    /// `.env` in the config directory, then `.env` in the working directory.
    pub fn default_for(config_dir: &Path) -> Self {
        let mut candidates = vec![config_dir.join(".env")];
        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join(".env"));
        }
        Self::new(candidates)
    }

    pub fn active_path(&self) -> Option<&Path> {
        self.candidates
            .iter()
            .map(PathBuf::as_path)
            .find(|p| p.exists())
    }
}

impl CredentialSource for EnvFileSource {
    fn name(&self) -> &str {
        "env file"
    }

    fn lookup(&self, key: CredentialKey) -> Result<Option<String>> {
        let Some(path) = self.active_path() else {
            return Ok(None);
        };

        let content = std::fs::read_to_string(path)?;
        Ok(parse_env_value(&content, key.as_str()))
    }
}

// Last occurrence wins within one file.
fn parse_env_value(content: &str, wanted: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once(':'))
        .filter(|(key, _)| key.trim() == wanted)
        .map(|(_, value)| value.trim().to_string())
        .last()
}

/// Fill empty credential fields from `sources`, in order.
///
/// A source that errors is logged and skipped. Populated fields are never
/// overwritten, and resolution stops as soon as both fields are set.
pub fn fill_credentials(config: &mut PubMedConfig, sources: &[Box<dyn CredentialSource>]) {
    for source in sources {
        let missing: Vec<CredentialKey> = CredentialKey::ALL
            .into_iter()
            .filter(|key| !key.is_set(config))
            .collect();
        if missing.is_empty() {
            return;
        }

        for key in missing {
            match source.lookup(key) {
                Ok(Some(value)) if !value.is_empty() => {
                    tracing::debug!("Resolved {} from {}", key.as_str(), source.name());
                    key.set(config, value);
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(
                        "Credential source {} failed: {}; skipping",
                        source.name(),
                        err
                    );
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    struct FailingStore;

    impl SecretStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Config("secret store unavailable".to_string()))
        }
    }

    #[test]
    fn test_parse_env_value() {
        let content = "# credentials\n\npubmed_email: a@b.org\napi_key :  k1 \nnot a pair\nurl: http://x\n";

        assert_eq!(parse_env_value(content, "pubmed_email").as_deref(), Some("a@b.org"));
        assert_eq!(parse_env_value(content, "api_key").as_deref(), Some("k1"));
        assert_eq!(parse_env_value(content, "url").as_deref(), Some("http://x"));
        assert_eq!(parse_env_value(content, "missing"), None);
    }

    #[test]
    fn test_populated_fields_are_kept() {
        let mut config = PubMedConfig {
            email: "settings@x.org".to_string(),
            ..PubMedConfig::default()
        };
        let sources: Vec<Box<dyn CredentialSource>> = vec![Box::new(SecretStoreSource::new(
            MapSecretStore::new()
                .with("pubmed_email", "secret@x.org")
                .with("api_key", "secret-key"),
        ))];

        fill_credentials(&mut config, &sources);

        assert_eq!(config.email, "settings@x.org");
        assert_eq!(config.api_key, "secret-key");
    }

    #[test]
    fn test_empty_values_fall_through() {
        let mut config = PubMedConfig::default();
        let sources: Vec<Box<dyn CredentialSource>> = vec![
            Box::new(SecretStoreSource::new(
                MapSecretStore::new().with("pubmed_email", "").with("api_key", "k"),
            )),
            Box::new(SecretStoreSource::new(
                MapSecretStore::new()
                    .with("pubmed_email", "second@x.org")
                    .with("api_key", "ignored"),
            )),
        ];

        fill_credentials(&mut config, &sources);

        assert_eq!(config.email, "second@x.org");
        assert_eq!(config.api_key, "k");
    }

    #[test]
    fn test_failing_source_is_skipped() {
        let mut config = PubMedConfig::default();
        let sources: Vec<Box<dyn CredentialSource>> = vec![
            Box::new(SecretStoreSource::new(FailingStore)),
            Box::new(SecretStoreSource::new(
                MapSecretStore::new().with("pubmed_email", "ok@x.org"),
            )),
        ];

        fill_credentials(&mut config, &sources);

        assert_eq!(config.email, "ok@x.org");
        assert!(config.api_key.is_empty());
    }
}
