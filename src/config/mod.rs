//
//  bagisto-storefront
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! This module loads the storefront SDK's configuration from a TOML file
//! in the platform configuration directory, with environment-variable
//! overrides applied on top.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/bagisto-storefront/config.toml`
//! - **macOS**: `~/Library/Application Support/bagisto-storefront/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\bagisto-storefront\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! api_url = "https://shop.example.com/api"
//! api_version = "v1"
//! default_locale = "ru"
//! timeout_ms = 15000
//! debug = true
//! ```
//!
//! ## Environment Overrides
//!
//! | Variable | Field |
//! |----------|-------|
//! | `STOREFRONT_API_URL` | `api_url` |
//! | `STOREFRONT_API_VERSION` | `api_version` |
//! | `STOREFRONT_DEFAULT_LOCALE` | `default_locale` |
//! | `STOREFRONT_TIMEOUT_MS` | `timeout_ms` |
//! | `STOREFRONT_DEBUG` | `debug` (`1`/`true` enable) |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bagisto_storefront::config::StorefrontConfig;
//!
//! let config = StorefrontConfig::load().expect("configuration");
//! println!("talking to {}", config.api_url);
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Default storefront API base URL, pointing at a local backend.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Default per-call timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30000;

/// Application-level configuration for the storefront SDK.
///
/// # Fields
///
/// * `api_url` - Base URL of the storefront API
/// * `api_version` - Optional version path segment (e.g. `"v1"`)
/// * `default_locale` - Locale used until the shopper picks one
/// * `timeout_ms` - Default per-call timeout in milliseconds
/// * `debug` - Whether the logger middleware is registered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Base URL of the storefront API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Optional API version segment.
    #[serde(default)]
    pub api_version: Option<String>,

    /// Locale used until the shopper picks one.
    #[serde(default = "default_locale")]
    pub default_locale: String,

    /// Default per-call timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Whether request/response logging is enabled.
    #[serde(default)]
    pub debug: bool,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_locale() -> String {
    crate::locale::DEFAULT_LOCALE.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_version: None,
            default_locale: default_locale(),
            timeout_ms: default_timeout_ms(),
            debug: false,
        }
    }
}

impl StorefrontConfig {
    /// Loads configuration from the default location with environment
    /// overrides applied.
    ///
    /// A missing configuration file is not an error; defaults are used.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or
    /// parsed.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Loads configuration from an explicit TOML file.
    ///
    /// Environment overrides are NOT applied; this is the raw file view.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("could not parse {}", path.display()))
    }

    /// The default configuration file path for this platform, when a home
    /// directory can be determined.
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "iamngoni", "bagisto-storefront")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Applies `STOREFRONT_*` environment-variable overrides in place.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("STOREFRONT_API_URL") {
            if !url.is_empty() {
                self.api_url = url;
            }
        }
        if let Ok(version) = std::env::var("STOREFRONT_API_VERSION") {
            self.api_version = if version.is_empty() { None } else { Some(version) };
        }
        if let Ok(locale) = std::env::var("STOREFRONT_DEFAULT_LOCALE") {
            if !locale.is_empty() {
                self.default_locale = locale;
            }
        }
        if let Ok(timeout) = std::env::var("STOREFRONT_TIMEOUT_MS") {
            if let Ok(timeout) = timeout.parse() {
                self.timeout_ms = timeout;
            }
        }
        if let Ok(debug) = std::env::var("STOREFRONT_DEBUG") {
            self.debug = debug == "1" || debug.eq_ignore_ascii_case("true");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.default_locale, crate::locale::DEFAULT_LOCALE);
        assert!(config.api_version.is_none());
        assert!(!config.debug);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "api_url = \"https://shop.example.com/api\"\ndefault_locale = \"ru\"\ndebug = true"
        )
        .unwrap();

        let config = StorefrontConfig::load_from(file.path()).unwrap();
        assert_eq!(config.api_url, "https://shop.example.com/api");
        assert_eq!(config.default_locale, "ru");
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert!(config.debug);
    }

    #[test]
    fn test_load_from_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_url = [not toml").unwrap();
        assert!(StorefrontConfig::load_from(file.path()).is_err());
    }
}
