//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the backend base URL and the last signed-in owner id.
//!
//! Configuration is stored at `~/.config/termincache/config.json`; the
//! replica database lives under the platform cache directory. The base
//! URL can be overridden with the `TERMINCACHE_API_URL` environment
//! variable (also honored from a `.env` file via the binary).

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "termincache";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Replica database file name
const DB_FILE: &str = "replica.db";

/// Environment variable overriding the configured base URL
const ENV_API_BASE_URL: &str = "TERMINCACHE_API_URL";

/// Default backend address (the development CRM server).
pub const DEFAULT_API_BASE_URL: &str = "http://192.168.2.34:5000";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub last_uid: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Where the replica database lives.
    pub fn db_path(&self) -> Result<PathBuf> {
        let cache_dir =
            dirs::cache_dir().ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME).join(DB_FILE))
    }

    /// Effective base URL: environment override, then config, then default.
    pub fn api_base_url(&self) -> String {
        resolve_base_url(std::env::var(ENV_API_BASE_URL).ok(), self.api_base_url.clone())
    }
}

fn resolve_base_url(env_value: Option<String>, configured: Option<String>) -> String {
    env_value
        .filter(|v| !v.trim().is_empty())
        .or(configured)
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}
