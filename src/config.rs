use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::persistence::DEFAULT_STORAGE_KEY;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub storage: StorageConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Enable mouse support in the terminal.
    pub mouse_enabled: bool,
}

/// Where and how the draft is saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
    /// Name of the saved record (file stem under the data directory).
    pub storage_key: String,
    /// Latency before each save is written.
    pub save_delay_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            mouse_enabled: false,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            save_delay_ms: 500,
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/seconboard/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}; using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}; using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.storage.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tui.tick_rate_ms.max(1))
    }

    pub fn save_delay(&self) -> Duration {
        Duration::from_millis(self.storage.save_delay_ms)
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("seconboard").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

/// `<data_dir>/seconboard`, or `./data` where the platform has none.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("seconboard"))
        .unwrap_or_else(|| PathBuf::from("data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.tui.tick_rate_ms, 50);
        assert!(!config.tui.mouse_enabled);
        assert!(config.storage.data_dir.is_none());
        assert_eq!(config.storage.storage_key, "financial-onboarding-form");
        assert_eq!(config.save_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_config_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml"));
        assert_eq!(config.tui.tick_rate_ms, 50);
    }

    #[test]
    fn test_config_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\nsave_delay_ms = 0\n").unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.storage.save_delay_ms, 0);
        assert_eq!(config.storage.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.tui.tick_rate_ms, 50);
    }

    #[test]
    fn test_config_load_unparseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "tui = [not toml").unwrap();
        assert_eq!(AppConfig::load_from(&path).tui.tick_rate_ms, 50);
    }

    #[test]
    fn test_data_dir_default() {
        let config = AppConfig::default();
        let dir = config.data_dir();
        assert!(dir.to_string_lossy().contains("seconboard") || dir == PathBuf::from("data"));
    }

    #[test]
    fn test_data_dir_override() {
        let mut config = AppConfig::default();
        config.storage.data_dir = Some(PathBuf::from("/tmp/custom"));
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/custom"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AppConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.tui.tick_rate_ms, config.tui.tick_rate_ms);
        assert_eq!(deserialized.storage.storage_key, config.storage.storage_key);
    }
}
