//! The four-field response envelope shared by every endpoint.

use crate::error::{Error, PanelErrorKind, Result, json_type_name};
use serde::Serialize;
use serde_json::Value;

/// A parsed panel response.
///
/// Any of the fields may be missing from the wire; they are `None` then.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Envelope {
    /// `"ok"` or `"error"`.
    pub status: Option<String>,
    pub data: Option<Value>,
    /// Panel error code, e.g. `NOT_FOUND`.
    pub error: Option<String>,
    /// Human readable detail.
    pub info: Option<String>,
}

impl Envelope {
    /// Extract the envelope fields from a decoded response body.
    ///
    /// `info` falls back to `error_data` when it is missing, null or empty.
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| match value.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };

        Self {
            status: text("status"),
            data: value.get("data").filter(|d| !d.is_null()).cloned(),
            error: text("error"),
            info: text("info").or_else(|| text("error_data")),
        }
    }

    /// Parse a raw response body.
    ///
    /// The body must be a JSON object; any other JSON value is an
    /// unexpected response.
    pub fn parse(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        if !value.is_object() {
            return Err(Error::unexpected_response(format!(
                "expected a JSON object, got {}",
                json_type_name(&value)
            )));
        }
        Ok(Self::from_value(&value))
    }

    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some("ok")
    }

    /// The failure kind for this envelope's error code, if it is a known one.
    pub fn error_kind(&self) -> Option<PanelErrorKind> {
        self.error.as_deref().and_then(PanelErrorKind::from_code)
    }

    /// Turn a recognized error code into an error; pass everything else through.
    pub fn check(self) -> Result<Self> {
        match self.error_kind() {
            Some(kind) => Err(Error::panel(kind, self.info)),
            None => Ok(self),
        }
    }

    /// The `data` field, `Value::Null` when absent.
    pub fn into_data(self) -> Value {
        self.data.unwrap_or(Value::Null)
    }
}
