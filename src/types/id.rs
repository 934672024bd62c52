//! Resource identifiers.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a role, server, user or scheduled task.
///
/// The panel accepts either form; both render to the same path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Int(i64),
    Str(String),
}

impl ResourceId {
    /// Read an id out of a dynamic JSON value.
    ///
    /// Only integers and strings are ids; anything else is a type mismatch.
    pub fn from_json(field: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .ok_or_else(|| Error::type_mismatch(field, "int or str", value)),
            Value::String(s) => Ok(Self::Str(s.clone())),
            other => Err(Error::type_mismatch(field, "int or str", other)),
        }
    }

    /// The numeric value of this id.
    ///
    /// String ids must parse as integers.
    pub fn as_int(&self, field: &str) -> Result<i64> {
        match self {
            Self::Int(n) => Ok(*n),
            Self::Str(s) => s.trim().parse().map_err(|_| {
                Error::invalid_argument(format!("'{field}' must be numeric, got \"{s}\""))
            }),
        }
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<i32> for ResourceId {
    fn from(id: i32) -> Self {
        Self::Int(i64::from(id))
    }
}

impl From<u32> for ResourceId {
    fn from(id: u32) -> Self {
        Self::Int(i64::from(id))
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self::Str(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self::Str(id)
    }
}

impl From<&String> for ResourceId {
    fn from(id: &String) -> Self {
        Self::Str(id.clone())
    }
}

impl From<&ResourceId> for ResourceId {
    fn from(id: &ResourceId) -> Self {
        id.clone()
    }
}

/// One server id or several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerIds {
    One(ResourceId),
    Many(Vec<ResourceId>),
}

impl ServerIds {
    /// Normalize to a list of ids.
    pub fn into_vec(self) -> Vec<ResourceId> {
        match self {
            Self::One(id) => vec![id],
            Self::Many(ids) => ids,
        }
    }

    /// Read one id or a list of ids out of a dynamic JSON value.
    pub fn from_json(field: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(|item| ResourceId::from_json(field, item))
                .collect::<Result<Vec<_>>>()
                .map(Self::Many),
            Value::Number(_) | Value::String(_) => {
                ResourceId::from_json(field, value).map(Self::One)
            }
            other => Err(Error::type_mismatch(field, "list[int] or int", other)),
        }
    }
}

impl From<ResourceId> for ServerIds {
    fn from(id: ResourceId) -> Self {
        Self::One(id)
    }
}

impl From<i64> for ServerIds {
    fn from(id: i64) -> Self {
        Self::One(id.into())
    }
}

impl From<i32> for ServerIds {
    fn from(id: i32) -> Self {
        Self::One(id.into())
    }
}

impl From<&str> for ServerIds {
    fn from(id: &str) -> Self {
        Self::One(id.into())
    }
}

impl<T: Into<ResourceId>> From<Vec<T>> for ServerIds {
    fn from(ids: Vec<T>) -> Self {
        Self::Many(ids.into_iter().map(Into::into).collect())
    }
}
