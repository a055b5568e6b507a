use crate::{Error, Result};
use std::path::PathBuf;

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "LITSCOPE_PATH";

/// Resolve the config directory based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. LITSCOPE_PATH environment variable (with tilde expansion)
/// 3. Platform config directory
/// 4. ~/.litscope
pub fn resolve_config_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var(CONFIG_DIR_ENV)
        && !env_path.trim().is_empty()
    {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("litscope"));
    }

    if let Some(home) = dirs::home_dir() {
        return Ok(home.join(".litscope"));
    }

    Err(Error::Config(
        "Could not determine config directory: no home or platform config directory found"
            .to_string(),
    ))
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
