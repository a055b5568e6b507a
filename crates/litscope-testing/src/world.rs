//! TestWorld pattern for isolated config and session directories.
//!
//! Provides a fluent interface for:
//! - Creating a throwaway config directory and session store directory
//! - Writing credential env files next to the config directory
//! - Reading back persisted JSON files

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Name of the local (highest priority) credential env file.
pub const LOCAL_ENV_FILE: &str = ".env.local";
/// Name of the fallback credential env file.
pub const ROOT_ENV_FILE: &str = ".env";

/// Declarative test environment.
///
/// # Example
/// ```no_run
/// use litscope_testing::TestWorld;
///
/// let world = TestWorld::new()
///     .with_local_env("pubmed_email: me@example.org\n");
///
/// assert!(world.local_env_path().exists());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    config_dir: PathBuf,
    store_dir: PathBuf,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated environment.
    ///
    /// The config directory is created; the store directory is left for the
    /// code under test to create.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_dir = temp_dir.path().join(".litscope");
        let store_dir = temp_dir.path().join("sessions");

        std::fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        Self {
            temp_dir,
            config_dir,
            store_dir,
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    pub fn local_env_path(&self) -> PathBuf {
        self.root().join(LOCAL_ENV_FILE)
    }

    pub fn root_env_path(&self) -> PathBuf {
        self.root().join(ROOT_ENV_FILE)
    }

    /// Write the local env file (`key: value` lines).
    pub fn with_local_env(self, contents: &str) -> Self {
        std::fs::write(self.local_env_path(), contents).expect("Failed to write local env file");
        self
    }

    /// Write the fallback env file (`key: value` lines).
    pub fn with_root_env(self, contents: &str) -> Self {
        std::fs::write(self.root_env_path(), contents).expect("Failed to write root env file");
        self
    }

    /// Write an arbitrary file under the config directory.
    pub fn with_config_file(self, name: &str, contents: &str) -> Self {
        std::fs::write(self.config_dir.join(name), contents)
            .expect("Failed to write config file");
        self
    }

    /// Parse a JSON file from the config directory.
    pub fn read_config_json(&self, name: &str) -> Result<Value> {
        let path = self.config_dir.join(name);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
    }

    /// Files currently in the store directory, sorted by name.
    pub fn store_files(&self) -> Vec<PathBuf> {
        let Ok(entries) = std::fs::read_dir(&self.store_dir) else {
            return Vec::new();
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect();
        files.sort();
        files
    }
}
