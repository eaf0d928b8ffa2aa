//! Config file location and loading.

use crate::schema::QuarryConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the Quarry config directory.
/// Priority: `QUARRY_CONFIG_DIR` env > `~/.quarry/`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("QUARRY_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".quarry"),
        None => PathBuf::from(".quarry"),
    }
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist (first run).
pub async fn load_config(path: &Path) -> Result<QuarryConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(QuarryConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    if raw.trim().is_empty() {
        return Ok(QuarryConfig::default());
    }

    let config: QuarryConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&config_file_path(dir.path())).await.unwrap();
        assert!(config.api_base.is_none());
    }

    #[tokio::test]
    async fn parses_camel_case_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        std::fs::write(
            &path,
            "apiBase: http://10.0.0.5:8000\nlogging:\n  level: debug\noverlay:\n  detailChipLimit: 6\n",
        )
        .unwrap();

        let config = load_config(&path).await.unwrap();
        assert_eq!(config.api_base(), "http://10.0.0.5:8000");
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.detail_chip_limit(), 6);
    }

    #[tokio::test]
    async fn invalid_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        std::fs::write(&path, "overlay: [not, a, map]\n").unwrap();
        assert!(load_config(&path).await.is_err());
    }
}
