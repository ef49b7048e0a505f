//! Configuration schema for relaunch
//!
//! Configuration is stored at `~/.config/relaunch/config.toml`

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Launch history settings
    pub history: HistoryConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Launch history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of remembered launches
    pub max_entries: usize,

    /// Cached resolutions older than this are resolved again
    pub expiry_hours: u32,

    /// Write the history file before returning from each change
    pub blocking_writes: bool,

    /// File name inside the storage root
    pub file_name: String,
}

impl HistoryConfig {
    /// Expiry window as a duration
    pub fn expiry(&self) -> Duration {
        Duration::hours(i64::from(self.expiry_hours))
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: 20,
            expiry_hours: 24,
            blocking_writes: false,
            file_name: "history.jsonl".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[general]"));
        assert!(toml.contains("[history]"));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.history.max_entries, 20);
        assert_eq!(config.history.expiry(), Duration::days(1));
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [history]
            max_entries = 5
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.history.max_entries, 5);
        assert_eq!(config.history.file_name, "history.jsonl"); // default preserved
        assert_eq!(config.general.log_format, "text");
    }
}
