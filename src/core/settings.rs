//! User overrides for the chain RPC endpoint and the IPFS gateway, kept in
//! the browser's `localStorage`.

use serde::{Deserialize, Serialize};
use std::fmt;

const STORAGE_KEY: &str = "grants-hub.settings";

pub const DEFAULT_IPFS_GATEWAY: &str = "https://gateway.pinata.cloud";

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    StorageUnavailable,
    InvalidUrl(String),
    Serialize(String),
    Write(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::StorageUnavailable => write!(f, "Local storage not available"),
            SettingsError::InvalidUrl(url) => write!(f, "Not an http(s) URL: {}", url),
            SettingsError::Serialize(msg) => write!(f, "Failed to serialize settings: {}", msg),
            SettingsError::Write(msg) => write!(f, "Failed to write settings: {}", msg),
        }
    }
}

/// String key/value storage the settings live in.
pub trait SettingsStorage {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), SettingsError>;
}

/// `window.localStorage`
pub struct BrowserStorage(web_sys::Storage);

impl BrowserStorage {
    pub fn open() -> Result<Self, SettingsError> {
        web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .map(BrowserStorage)
            .ok_or(SettingsError::StorageUnavailable)
    }
}

impl SettingsStorage for BrowserStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.0.get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.0.set_item(key, value)
            .map_err(|e| SettingsError::Write(format!("{:?}", e)))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RpcSelection {
    Default,
    Custom,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub rpc_selection: RpcSelection,
    /// Kept while the default endpoint is selected so switching back restores it
    #[serde(default)]
    pub custom_rpc_url: String,
    /// Base URL of the IPFS gateway used to dereference metadata pointers
    #[serde(default)]
    pub ipfs_gateway_url: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            rpc_selection: RpcSelection::Default,
            custom_rpc_url: String::new(),
            ipfs_gateway_url: String::new(),
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim().trim_end_matches('/');
    (!trimmed.is_empty()).then_some(trimmed)
}

fn check_url(value: &str) -> Result<(), SettingsError> {
    match non_empty(value) {
        Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
            Err(SettingsError::InvalidUrl(url.to_string()))
        }
        _ => Ok(()),
    }
}

impl UserSettings {
    /// Stored settings; a missing or unreadable entry gives the defaults.
    pub fn load_from(storage: &dyn SettingsStorage) -> Self {
        let Some(value) = storage.read(STORAGE_KEY) else {
            return Self::default();
        };
        serde_json::from_str(&value).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable settings: {}", e);
            Self::default()
        })
    }

    pub fn save_to(&self, storage: &dyn SettingsStorage) -> Result<(), SettingsError> {
        self.validate()?;
        let serialized = serde_json::to_string(self)
            .map_err(|e| SettingsError::Serialize(e.to_string()))?;
        storage.write(STORAGE_KEY, &serialized)
    }

    /// Both overrides must be http(s) URLs when set. An unused custom RPC
    /// URL is not checked.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.rpc_selection == RpcSelection::Custom {
            check_url(&self.custom_rpc_url)?;
        }
        check_url(&self.ipfs_gateway_url)
    }

    /// The custom endpoint, when selected and filled in.
    pub fn custom_rpc_endpoint(&self) -> Option<String> {
        match self.rpc_selection {
            RpcSelection::Custom => non_empty(&self.custom_rpc_url).map(str::to_string),
            RpcSelection::Default => None,
        }
    }

    /// Gateway base URL without a trailing slash
    pub fn ipfs_gateway(&self) -> String {
        non_empty(&self.ipfs_gateway_url)
            .unwrap_or(DEFAULT_IPFS_GATEWAY)
            .to_string()
    }
}

/// Stored settings, or the defaults outside a browser or before first save.
pub fn load_settings() -> UserSettings {
    if !cfg!(target_arch = "wasm32") {
        return UserSettings::default();
    }
    match BrowserStorage::open() {
        Ok(storage) => UserSettings::load_from(&storage),
        Err(_) => UserSettings::default(),
    }
}

pub fn save_settings(settings: &UserSettings) -> Result<(), SettingsError> {
    settings.save_to(&BrowserStorage::open()?)
}
