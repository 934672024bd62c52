//! Configuration management for the Crafty client.

mod settings;

pub use settings::{ClientConfig, Config, CredentialsConfig};

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "crafty-controller", "crafty-client")
        .ok_or_else(|| Error::config("Could not determine home directory"))
}

/// Get the configuration directory path.
pub fn config_dir() -> Result<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the log directory path.
pub fn log_dir() -> Result<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("logs"))
}

/// Default location of `config.toml`.
pub fn default_config_path() -> PathBuf {
    config_dir()
        .map(|p| p.join("config.toml"))
        .unwrap_or_else(|_| PathBuf::from("config.toml"))
}
