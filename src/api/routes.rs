//! API paths.

use crate::error::{Error, Result};
use crate::types::{ResourceId, Schema, ServerAction};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

pub const BASE_URL: &str = "/api/v2";
pub const AUTH_URL: &str = "/api/v2/auth";
pub const LOGIN_URL: &str = "/api/v2/auth/login";
pub const INVALIDATE_TOKENS_URL: &str = "/api/v2/auth/invalidate_tokens";
pub const ROLES_URL: &str = "/api/v2/roles";
pub const SERVERS_URL: &str = "/api/v2/servers";
pub const USERS_URL: &str = "/api/v2/users";
pub const SCHEMA_URL: &str = "/api/v2/jsonschema";

/// Characters escaped inside one path segment: the URL path set plus the
/// separators `Url::join` would otherwise act on.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Render an id as exactly one path segment.
fn segment(id: &ResourceId) -> Result<String> {
    match id {
        ResourceId::Int(n) => Ok(n.to_string()),
        ResourceId::Str(s) if s.is_empty() || s == "." || s == ".." => {
            Err(Error::invalid_argument(format!("invalid resource id \"{s}\"")))
        }
        ResourceId::Str(s) => Ok(utf8_percent_encode(s, SEGMENT).to_string()),
    }
}

pub fn role(id: &ResourceId) -> Result<String> {
    Ok(format!("{ROLES_URL}/{}", segment(id)?))
}

/// A role sub-resource: `servers` or `users`.
pub fn role_resource(id: &ResourceId, resource: &str) -> Result<String> {
    Ok(format!("{ROLES_URL}/{}/{resource}", segment(id)?))
}

pub fn server(id: &ResourceId) -> Result<String> {
    Ok(format!("{SERVERS_URL}/{}", segment(id)?))
}

/// A server sub-resource: `stats`, `logs`, `users`, `public`, `stdin`, `tasks`.
pub fn server_resource(id: &ResourceId, resource: &str) -> Result<String> {
    Ok(format!("{SERVERS_URL}/{}/{resource}", segment(id)?))
}

pub fn server_action(id: &ResourceId, action: ServerAction) -> Result<String> {
    Ok(format!("{SERVERS_URL}/{}/action/{action}", segment(id)?))
}

pub fn server_task(server_id: &ResourceId, task_id: &ResourceId) -> Result<String> {
    Ok(format!(
        "{SERVERS_URL}/{}/tasks/{}",
        segment(server_id)?,
        segment(task_id)?
    ))
}

pub fn user(id: &ResourceId) -> Result<String> {
    Ok(format!("{USERS_URL}/{}", segment(id)?))
}

/// A user sub-resource: `permissions`, `pfp`, `public`.
pub fn user_resource(id: &ResourceId, resource: &str) -> Result<String> {
    Ok(format!("{USERS_URL}/{}/{resource}", segment(id)?))
}

pub fn schema(schema: Schema) -> String {
    format!("{SCHEMA_URL}/{schema}")
}
