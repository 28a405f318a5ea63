//! Configuration management module.
//!
//! This module handles loading, saving, and managing application
//! configuration: the data directory override, the notification default,
//! and the persisted tab/status filter selections.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/quest-tui";
const DATA_DIRECTORY_NAME: &str = "quest-tui";

/// Oversees management of configuration file.
///
#[derive(Clone)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub notifications_enabled: bool,
    pub last_tab: String,
    pub last_status_filter: String,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_notifications_enabled")]
    pub notifications_enabled: bool,
    #[serde(default = "default_filter_name")]
    pub last_tab: String,
    #[serde(default = "default_filter_name")]
    pub last_status_filter: String,
}

fn default_notifications_enabled() -> bool {
    true
}

fn default_filter_name() -> String {
    "all".to_string()
}

impl Config {
    /// Return a new empty instance.
    ///
    pub fn new() -> Config {
        Config {
            data_dir: None,
            notifications_enabled: default_notifications_enabled(),
            last_tab: default_filter_name(),
            last_status_filter: default_filter_name(),
            file_path: None,
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// path if provided. A missing file leaves the defaults in place; the
    /// file is created on the first save.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        // Try to create dir path if it doesn't exist
        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        // Specify config file path
        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;

        if file_path.exists() {
            let contents = fs::read_to_string(file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            let data: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            self.data_dir = data.data_dir;
            self.notifications_enabled = data.notifications_enabled;
            self.last_tab = data.last_tab;
            self.last_status_filter = data.last_status_filter;
        }

        Ok(())
    }

    /// Save the current configuration to disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            data_dir: self.data_dir.clone(),
            notifications_enabled: self.notifications_enabled,
            last_tab: self.last_tab.clone(),
            last_status_filter: self.last_status_filter.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Resolve the data directory: the configured override, or the
    /// platform-local data directory, created if needed.
    ///
    pub fn resolve_data_dir(&self) -> Result<PathBuf, AppError> {
        let dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_local_dir()
                .ok_or(ConfigError::DataDirectoryNotFound)?
                .join(DATA_DIRECTORY_NAME),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir.clone(),
                source: e,
            })?;
        }
        Ok(dir)
    }

    /// Returns the path buffer for the default path to the configuration file
    /// or an error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => {
                let home_path = Path::new(&home);
                let default_config_path = Path::new(DEFAULT_DIRECTORY_PATH);
                Ok(home_path.join(default_config_path))
            }
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_spec_defaults_apply_to_missing_fields() {
        let data: FileSpec = serde_yaml::from_str("data_dir: /tmp/quests\n").unwrap();
        assert_eq!(data.data_dir, Some(PathBuf::from("/tmp/quests")));
        assert!(data.notifications_enabled);
        assert_eq!(data.last_tab, "all");
        assert_eq!(data.last_status_filter, "all");
    }

    #[test]
    fn file_spec_round_trips() {
        let data = FileSpec {
            data_dir: None,
            notifications_enabled: false,
            last_tab: "main".to_string(),
            last_status_filter: "active".to_string(),
        };
        let text = serde_yaml::to_string(&data).unwrap();
        let parsed: FileSpec = serde_yaml::from_str(&text).unwrap();
        assert!(!parsed.notifications_enabled);
        assert_eq!(parsed.last_tab, "main");
        assert_eq!(parsed.last_status_filter, "active");
    }

    #[test]
    fn save_without_a_loaded_path_fails() {
        let config = Config::new();
        assert!(config.save().is_err());
    }
}
