use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::utils::{self, Profile};

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Explicit save file location. When unset, the profile's data directory
    /// is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_file_path: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_file_path: None,
            log_level: default_log_level(),
            config_version: Some(CURRENT_CONFIG_VERSION),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
}

impl Config {
    /// Load configuration from the profile's config file, or create and save
    /// the defaults if it is missing.
    pub fn load_with_profile(profile: Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;

        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            let mut config = Config::default();
            config.save_with_profile(profile)?;
            Ok(config)
        }
    }

    /// Load configuration from an explicit path (the `--config` override).
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::ReadError(e.to_string()))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save configuration to the profile's config file.
    pub fn save_with_profile(&mut self, profile: Profile) -> Result<(), ConfigError> {
        self.config_version = Some(CURRENT_CONFIG_VERSION);

        let config_path = Self::get_config_path(profile)?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {e}")))?;
        fs::write(&config_path, toml_string).map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path(profile: Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile).ok_or_else(|| {
            ConfigError::ConfigDirError("Could not determine config directory".to_string())
        })?;
        Ok(config_dir.join("config.toml"))
    }

    /// Resolve the save file path for `profile`, with `~` expansion applied
    /// to a user-provided path.
    pub fn save_file_path(&self, profile: Profile) -> PathBuf {
        match &self.save_file_path {
            Some(path) => utils::expand_path(path),
            None => Self::default_save_file_path_for_profile(profile),
        }
    }

    fn default_save_file_path_for_profile(profile: Profile) -> PathBuf {
        match utils::get_data_dir(profile) {
            Some(data_dir) => data_dir.join("tasks.txt"),
            // Fallback for platforms without a resolvable data dir.
            None => PathBuf::from("./data/tasks.txt"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: Config = toml::from_str("").expect("empty config parses");
        assert_eq!(config.save_file_path, None);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.config_version, Some(CURRENT_CONFIG_VERSION));
    }

    #[test]
    fn explicit_save_file_path_wins_over_profile_default() {
        let config: Config =
            toml::from_str("save_file_path = \"/tmp/elsewhere/tasks.txt\"").expect("parses");
        assert_eq!(
            config.save_file_path(Profile::Prod),
            PathBuf::from("/tmp/elsewhere/tasks.txt")
        );
    }

    #[test]
    fn load_from_path_round_trips() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_level = \"debug\"\n").expect("write fixture");

        let config = Config::load_from_path(&path).expect("load");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn load_from_missing_path_is_a_read_error() {
        let dir = tempdir().expect("tempdir");
        let result = Config::load_from_path(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}
