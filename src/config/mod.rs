//! Configuration management for relaunch

pub mod schema;

pub use schema::{Config, HistoryConfig};

use crate::error::{RelaunchError, RelaunchResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Locates and reads `config.toml` and the history storage root
///
/// Both default to per-user directories and can be overridden from the
/// command line (`--config`, `--root`).
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Manager for `~/.config/relaunch/config.toml`
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Manager for an explicit config file
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Per-user config file location
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("relaunch")
            .join("config.toml")
    }

    /// Per-user directory holding the history file
    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("relaunch")
    }

    /// Storage root for the history store, preferring an explicit override
    pub fn history_root(root: Option<PathBuf>) -> PathBuf {
        root.unwrap_or_else(Self::data_dir)
    }

    /// Read the config file; a missing file means every setting is default
    pub async fn load(&self) -> RelaunchResult<Config> {
        if !self.config_path.exists() {
            debug!("No config at {}, using defaults", self.config_path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.config_path).await.map_err(|e| {
            RelaunchError::io(
                format!("reading config from {}", self.config_path.display()),
                e,
            )
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|e| RelaunchError::ConfigInvalid {
                path: self.config_path.clone(),
                reason: e.to_string(),
            })?;

        debug!(
            "Loaded config: max {} entries, {}h expiry",
            config.history.max_entries, config.history.expiry_hours
        );
        Ok(config)
    }

    /// Write `config` as TOML, creating the config directory if needed
    pub async fn save(&self, config: &Config) -> RelaunchResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            RelaunchError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    async fn ensure_config_dir(&self) -> RelaunchResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| RelaunchError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Config file this manager reads and writes
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
