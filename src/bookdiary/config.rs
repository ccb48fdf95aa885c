//! # Configuration
//!
//! Settings live in `config.json` inside the user config directory
//! (`directories::ProjectDirs`), or inside `$BOOKDIARY_HOME` when that is set.
//!
//! ## Data File Resolution
//!
//! The library file is chosen in priority order:
//! 1. `--data-file <path>` on the command line
//! 2. `BOOKDIARY_DATA_FILE` environment variable
//! 3. `data_file` in `config.json`
//! 4. `book_data.json` in the working directory
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data-file` | `book_data.json` | Path of the JSON library file |

use crate::error::{BookDiaryError, Result};
use crate::store::fs::DEFAULT_DATA_FILE;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
pub const HOME_ENV: &str = "BOOKDIARY_HOME";
pub const DATA_FILE_ENV: &str = "BOOKDIARY_DATA_FILE";
pub const KEYS: &[&str] = &["data-file"];

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookDiaryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

impl BookDiaryConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(BookDiaryError::Io)?;
        let config: BookDiaryConfig =
            serde_json::from_str(&content).map_err(BookDiaryError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(BookDiaryError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(BookDiaryError::Serialization)?;
        fs::write(config_path, content).map_err(BookDiaryError::Io)?;
        Ok(())
    }

    /// Value of `key` as shown to the user, defaults included.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data-file" => Some(
                self.data_file
                    .as_deref()
                    .unwrap_or_else(|| Path::new(DEFAULT_DATA_FILE))
                    .display()
                    .to_string(),
            ),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "data-file" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(BookDiaryError::MissingField("data-file"));
                }
                self.data_file = Some(PathBuf::from(value));
                Ok(())
            }
            _ => Err(BookDiaryError::Api(format!("Unknown config key: {}", key))),
        }
    }

    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            "data-file" => {
                self.data_file = None;
                Ok(())
            }
            _ => Err(BookDiaryError::Api(format!("Unknown config key: {}", key))),
        }
    }

    /// Picks the data file: flag, then env value, then config, then the default name.
    pub fn resolve_data_file(&self, flag: Option<PathBuf>, env: Option<OsString>) -> PathBuf {
        flag.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
            .or_else(|| self.data_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }
}

/// Directory holding `config.json`.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "bookdiary", "bookdiary")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| BookDiaryError::Store("Could not determine config dir".to_string()))
}
