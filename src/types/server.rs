//! Server action, log query and patch types.

use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Lifecycle actions accepted by `/servers/{id}/action/{action}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerAction {
    Clone,
    Start,
    Stop,
    Restart,
    Kill,
    Backup,
    UpdateExecutable,
}

impl ServerAction {
    pub const ALL: [ServerAction; 7] = [
        Self::Clone,
        Self::Start,
        Self::Stop,
        Self::Restart,
        Self::Kill,
        Self::Backup,
        Self::UpdateExecutable,
    ];

    /// The action's path segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clone => "clone_server",
            Self::Start => "start_server",
            Self::Stop => "stop_server",
            Self::Restart => "restart_server",
            Self::Kill => "kill_server",
            Self::Backup => "backup_server",
            Self::UpdateExecutable => "update_executable",
        }
    }
}

impl FromStr for ServerAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|a| a.as_str()).collect();
                Error::invalid_argument(format!(
                    "Invalid action \"{s}\". Valid actions are: {}",
                    valid.join(", ")
                ))
            })
    }
}

impl std::fmt::Display for ServerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query toggles for `/servers/{id}/logs`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// Read the log file instead of the console buffer.
    pub file: bool,
    /// Add HTML coloring.
    pub colors: bool,
    /// Disable ANSI stripping.
    pub raw: bool,
    /// Return HTML formatted lines.
    pub html: bool,
}

impl LogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, file: bool) -> Self {
        self.file = file;
        self
    }

    pub fn colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    pub fn html(mut self, html: bool) -> Self {
        self.html = html;
        self
    }

    /// Query pairs for the enabled toggles only.
    pub fn query(&self) -> Vec<(&'static str, &'static str)> {
        [
            ("file", self.file),
            ("colors", self.colors),
            ("raw", self.raw),
            ("html", self.html),
        ]
        .into_iter()
        .filter(|(_, enabled)| *enabled)
        .map(|(key, _)| (key, "true"))
        .collect()
    }
}

/// Server fields that may be changed through `PATCH /servers/{id}`.
pub const SERVER_PATCH_FIELDS: [&str; 17] = [
    "server_name",
    "path",
    "backup_path",
    "executable",
    "log_path",
    "execution_command",
    "auto_start",
    "auto_start_delay",
    "crash_detection",
    "stop_command",
    "executable_update_url",
    "server_ip",
    "server_port",
    "logs_delete_after",
    "type",
    "show_status",
    "shutdown_timeout",
];

/// A partial server update restricted to [`SERVER_PATCH_FIELDS`].
///
/// Keys outside the allow-list are dropped without error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerPatch {
    fields: Map<String, Value>,
}

impl ServerPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, ignoring keys the panel does not allow.
    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        if SERVER_PATCH_FIELDS.contains(&key) {
            self.fields.insert(key.to_string(), value.into());
        } else {
            tracing::debug!(key, "Dropping server patch field outside the allow-list");
        }
        self
    }

    /// Build a patch from an arbitrary JSON object.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::type_mismatch("data", "dict", value))?;
        Ok(object
            .iter()
            .fold(Self::new(), |patch, (key, value)| patch.set(key, value.clone())))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_json(self) -> Value {
        Value::Object(self.fields)
    }
}
