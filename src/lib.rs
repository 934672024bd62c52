//! # crafty-client
//!
//! An async client for the [Crafty Controller](https://craftycontrol.com)
//! v2 HTTP API, used to manage Minecraft servers remotely.
//!
//! ## Layout
//!
//! - **API**: [`CraftyClient`], its transport and the resource operations
//!   for roles, servers, schedules, users and JSON schemas
//! - **Types**: argument values validated before any request is sent
//! - **Config**: connection settings loaded from file and environment
//! - **Error**: the crate error and the panel's error codes
//!
//! ```no_run
//! use crafty_client::{Config, CraftyClient};
//! use crafty_client::types::Password;
//!
//! # async fn run() -> crafty_client::Result<()> {
//! let config = Config::load_or_default()?;
//! let client = CraftyClient::new(&config.client)?;
//! let token = client.login("admin", &Password::from("hunter2")).await?;
//! let client = client.with_token(token);
//! let servers = client.get_all_servers().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod types;

pub use api::CraftyClient;
pub use config::Config;
pub use error::{Error, PanelErrorKind, Result};
