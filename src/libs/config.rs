//! Configuration management for tasklist.
//!
//! Settings are stored as pretty-printed JSON in `config.json` inside the
//! platform data directory (see [`DataStorage`]). A missing file means
//! defaults; missing fields inside an existing file fall back to their
//! defaults as well, so older files keep working.
//!
//! ```rust,no_run
//! use tasklist::libs::config::Config;
//!
//! let config = Config::read()?;
//! println!("storage key: {}", config.storage.key);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use super::persistence::DEFAULT_STORAGE_KEY;
use super::storage::validate_key;
use crate::libs::messages::Message;
use anyhow::Result;
use chrono::Duration;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Where and under which key the task list is persisted.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory of the durable store. `None` uses the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Key the serialized task list is stored under.
    pub key: String,
}

/// Auto-dismiss delays for the warnings the controller raises on its own.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct NoticeConfig {
    /// Shown at startup when durable storage is unavailable.
    pub startup_warning_ms: u64,

    /// Shown after a save had to fall back to temporary storage.
    pub fallback_warning_ms: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub notices: NoticeConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: None,
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl Default for NoticeConfig {
    fn default() -> Self {
        NoticeConfig {
            startup_warning_ms: 8000,
            fallback_warning_ms: 5000,
        }
    }
}

impl NoticeConfig {
    pub fn startup_warning(&self) -> Duration {
        millis_to_duration(self.startup_warning_ms)
    }

    pub fn fallback_warning(&self) -> Duration {
        millis_to_duration(self.fallback_warning_ms)
    }
}

/// Saturates at the largest representable duration instead of wrapping.
fn millis_to_duration(millis: u64) -> Duration {
    i64::try_from(millis).ok().and_then(Duration::try_milliseconds).unwrap_or(Duration::MAX)
}

impl StorageConfig {
    /// Data directory the durable task store lives in.
    pub fn data_storage(&self) -> DataStorage {
        match &self.data_dir {
            Some(dir) => DataStorage::at(dir),
            None => DataStorage::new(),
        }
    }
}

impl Config {
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        validate_key(&config.storage.key)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        validate_key(&self.storage.key)?;
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Interactive wizard seeded with the current (or default) settings.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let data_dir: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptDataDirectory.to_string())
            .default(config.storage.data_dir.as_ref().map(|dir| dir.display().to_string()).unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;
        config.storage.data_dir = match data_dir.trim() {
            "" => None,
            dir => Some(PathBuf::from(dir)),
        };

        config.storage.key = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptStorageKey.to_string())
            .default(config.storage.key.clone())
            .validate_with(|key: &String| validate_key(key).map_err(|e| e.to_string()))
            .interact_text()?;

        Ok(config)
    }
}
