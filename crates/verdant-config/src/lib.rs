//! Shared configuration for Verdant binaries.
//!
//! Layered loading (defaults < TOML file < `VERDANT_*` environment) via
//! figment, and translation into `verdant_core::ControllerConfig`. The
//! core crate never reads disk -- binaries load a `Config` here and
//! hand the translated result in.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use verdant_core::ControllerConfig;
use verdant_core::config::DEFAULT_POLL_INTERVAL_MS;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config struct ───────────────────────────────────────────────────

/// On-disk + environment configuration for the greenhouse connection.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Backend root URL (the `/api` prefix is appended per request).
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Polling period in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Whether the polling scheduler starts armed.
    #[serde(default = "default_auto_refresh")]
    pub auto_refresh: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            auto_refresh: default_auto_refresh(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:5000".into()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_auto_refresh() -> bool {
    true
}

// ── Loading ─────────────────────────────────────────────────────────

/// Default config file path (e.g. `~/.config/verdant/config.toml`).
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "verdant")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("verdant.toml"))
}

/// Figment layering for a given config file path.
pub fn figment_for(path: PathBuf) -> Figment {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("VERDANT_"))
}

/// Load configuration from the default path and environment.
pub fn load() -> Result<Config, ConfigError> {
    load_from(&figment_for(config_path()))
}

/// Extract a `Config` from a prepared figment (testing seam).
pub fn load_from(figment: &Figment) -> Result<Config, ConfigError> {
    Ok(figment.extract()?)
}

// ── Translation ─────────────────────────────────────────────────────

impl Config {
    /// Translate into the core runtime configuration.
    pub fn into_controller_config(self) -> Result<ControllerConfig, ConfigError> {
        let base_url: Url = self.url.parse().map_err(|e| ConfigError::Validation {
            field: "url".into(),
            reason: format!("'{}' is not a valid URL: {e}", self.url),
        })?;

        Ok(ControllerConfig {
            base_url,
            timeout: Duration::from_secs(self.timeout_secs),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            auto_refresh: self.auto_refresh,
        })
    }
}
