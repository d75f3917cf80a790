//! Client configuration.
//!
//! Stored as `config.json` in the data directory resolved by
//! [`DataStorage`]. The only setting today is the API base URL; the
//! `PUNCHCLOCK_API_URL` environment variable overrides the file.
//!
//! ```rust,no_run
//! use punchclock::libs::config::Config;
//!
//! let config = Config::read()?;
//! println!("{}", config.api_url());
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";
pub const API_URL_ENV: &str = "PUNCHCLOCK_API_URL";

/// Connection settings for the record-keeping service.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// Base URL every endpoint path is appended to, e.g.
    /// `https://attendance.example.com/api`.
    pub api_url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,
}

impl Config {
    /// Reads the configuration, or returns the default when no file exists.
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new())
    }

    pub fn read_from(storage: &DataStorage) -> Result<Config> {
        let path = storage.get_path(CONFIG_FILE_NAME)?;
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&DataStorage::new())
    }

    pub fn save_to(&self, storage: &DataStorage) -> Result<()> {
        let file = File::create(storage.get_path(CONFIG_FILE_NAME)?)?;
        serde_json::to_writer_pretty(&file, self)?;
        Ok(())
    }

    /// Effective API base URL: environment override, then the file, then
    /// [`DEFAULT_API_URL`].
    pub fn api_url(&self) -> String {
        if let Ok(url) = env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                return url.trim().to_string();
            }
        }
        self.server
            .as_ref()
            .map(|server| server.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Interactive wizard pre-filled with the current values.
    pub fn init() -> Result<Config> {
        let mut config = Config::read()?;
        msg_print!(Message::ConfigModuleServer, true);

        let current = config
            .server
            .as_ref()
            .map(|server| server.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptServerApiUrl.to_string())
            .default(current)
            .interact_text()?;

        config.server = Some(ServerConfig {
            api_url: api_url.trim().trim_end_matches('/').to_string(),
        });
        Ok(config)
    }
}
