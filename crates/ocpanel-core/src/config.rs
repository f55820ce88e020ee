//! Application configuration management.
//!
//! This module handles loading and saving the panel configuration, which
//! includes the server base address, the credential storage backend, and the
//! last account used to log in.
//!
//! Configuration is stored at `~/.config/ocpanel/config.json`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{FileStorage, KeyringStorage, MemoryStorage, SessionStore};

/// Application name used for config/data directory paths
pub const APP_NAME: &str = "ocpanel";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Token storage file name, under the data directory
const STORAGE_FILE: &str = "storage.json";

/// Server address used when nothing else is configured
pub const DEFAULT_BASE_ADDRESS: &str = "http://127.0.0.1:7777/backend";

/// Environment variable overriding `base_address`
pub const BASE_ADDRESS_ENV: &str = "OCPANEL_BASE_ADDRESS";

/// Where the session token is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Keyring,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "keyring" => Ok(StorageBackend::Keyring),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(anyhow::anyhow!(
                "Unknown storage backend {other:?} (expected file, keyring or memory)"
            )),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StorageBackend::File => "file",
            StorageBackend::Keyring => "keyring",
            StorageBackend::Memory => "memory",
        };
        f.pad(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_address: String,
    pub storage: StorageBackend,
    pub last_account: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_address: DEFAULT_BASE_ADDRESS.to_string(),
            storage: StorageBackend::default(),
            last_account: None,
            last_login: None,
            log_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn storage_path() -> Result<PathBuf> {
        let data_dir =
            dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME).join(STORAGE_FILE))
    }

    /// Apply `OCPANEL_BASE_ADDRESS` if it is set and non-empty
    pub fn apply_env_overrides(&mut self) {
        if let Ok(address) = std::env::var(BASE_ADDRESS_ENV) {
            self.apply_base_address(&address);
        }
    }

    fn apply_base_address(&mut self, address: &str) {
        let address = address.trim();
        if !address.is_empty() {
            self.base_address = address.to_string();
        }
    }

    /// Record a successful login for the next prompt
    pub fn remember_login(&mut self, account: &str) {
        self.last_account = Some(account.to_string());
        self.last_login = Some(Utc::now());
    }

    /// Open the session store for the configured backend
    pub fn open_session(&self) -> Result<SessionStore> {
        let session = match self.storage {
            StorageBackend::File => SessionStore::new(FileStorage::new(Self::storage_path()?)),
            StorageBackend::Keyring => SessionStore::new(KeyringStorage::new()),
            StorageBackend::Memory => SessionStore::new(MemoryStorage::new()),
        };
        Ok(session)
    }
}
