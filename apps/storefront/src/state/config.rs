//! # Configuration State
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`FOLIO_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after startup.

use std::path::PathBuf;

use directories::ProjectDirs;
use folio_core::Money;
use serde::Serialize;

/// File name of the key-value store inside the data directory.
pub const STORE_FILE_NAME: &str = "store.json";

/// Application configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name shown in the header and footer
    pub store_name: String,

    /// Appended to every formatted price ("15,000원")
    pub currency_suffix: String,

    /// Explicit location of the key-value file.
    /// `None` means the platform data directory.
    pub data_path: Option<PathBuf>,

    /// Keep everything in memory; nothing is written to disk.
    pub ephemeral: bool,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "Folio 서점"
    /// - Currency suffix: "원"
    /// - Data path: platform data directory
    /// - Ephemeral: off
    fn default() -> Self {
        ConfigState {
            store_name: "Folio 서점".to_string(),
            currency_suffix: "원".to_string(),
            data_path: None,
            ephemeral: false,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `FOLIO_DATA_PATH`: key-value file location
    /// - `FOLIO_EPHEMERAL`: `1` or `true` keeps state in memory only
    /// - `FOLIO_STORE_NAME`: override store name
    /// - `FOLIO_CURRENCY_SUFFIX`: override the price suffix
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(path) = lookup("FOLIO_DATA_PATH").filter(|p| !p.trim().is_empty()) {
            config.data_path = Some(PathBuf::from(path));
        }

        if let Some(flag) = lookup("FOLIO_EPHEMERAL") {
            config.ephemeral = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        if let Some(store_name) = lookup("FOLIO_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(suffix) = lookup("FOLIO_CURRENCY_SUFFIX") {
            config.currency_suffix = suffix;
        }

        config
    }

    /// Where the key-value file lives.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.folio.storefront/store.json`
    /// - **Windows**: `%APPDATA%\folio\storefront\data\store.json`
    /// - **Linux**: `~/.local/share/storefront/store.json`
    ///
    /// `None` when there is no override and no home directory to derive one.
    pub fn store_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.data_path {
            return Some(path.clone());
        }

        ProjectDirs::from("com", "folio", "storefront").map(|dirs| dirs.data_dir().join(STORE_FILE_NAME))
    }

    /// Formats a price for display.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::Money;
    /// use folio_storefront_lib::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_price(Money::from_won(15_000)), "15,000원");
    /// ```
    pub fn format_price(&self, amount: Money) -> String {
        amount.format_with_suffix(&self.currency_suffix)
    }
}
