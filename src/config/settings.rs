//! Configuration settings for the Crafty client.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Panel connection settings.
    pub client: ClientConfig,
    /// Stored login credentials (optional).
    pub credentials: CredentialsConfig,
}

impl Config {
    /// Load configuration from the default location.
    pub fn load_or_default() -> Result<Self> {
        Self::load(None)
    }

    /// Load configuration from a TOML file overlaid with `CRAFTY_*` environment variables.
    ///
    /// Nested keys use a double underscore, e.g. `CRAFTY_CLIENT__URL` or
    /// `CRAFTY_CREDENTIALS__USERNAME`. A missing file is not an error.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        Self::build(path, true)
    }

    /// Load only what the file holds, without the environment overlay.
    pub fn load_file(path: Option<PathBuf>) -> Result<Self> {
        Self::build(path, false)
    }

    fn build(path: Option<PathBuf>, with_env: bool) -> Result<Self> {
        let config_path = path.unwrap_or_else(super::default_config_path);

        let mut builder = ::config::Config::builder()
            .add_source(::config::File::from(config_path.as_path()).required(false));
        if with_env {
            builder = builder.add_source(
                ::config::Environment::with_prefix("CRAFTY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        builder
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| Error::config(e.to_string()))
    }

    /// Store `token` in the config file, keeping the file's other settings.
    ///
    /// Environment overrides are never written back.
    pub fn save_token(path: Option<PathBuf>, token: &str) -> Result<()> {
        let mut stored = Self::load_file(path.clone())?;
        stored.client.token = Some(token.to_string());
        stored.save(path)
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = path.unwrap_or_else(super::default_config_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

/// Panel connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Panel base URL, e.g. `https://localhost:8443`.
    pub url: String,
    /// API token from a previous login.
    pub token: Option<String>,
    /// Verify the panel's TLS certificate. Off by default since panels
    /// usually run with a self-signed certificate.
    pub verify_ssl: bool,
    /// Request timeout in seconds; unset leaves the transport default.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: "https://localhost:8443".to_string(),
            token: None,
            verify_ssl: false,
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }
}

/// Stored login credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    /// File holding the password, used instead of `password`.
    pub password_file: Option<PathBuf>,
}
