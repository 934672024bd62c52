//! Argument types for the panel API.
//!
//! Loosely typed panel parameters (ids that may be numbers or strings, one
//! id or a list, one permission string or one per server) are modelled as
//! small enums and validated here, before any request is built.

mod auth;
mod id;
mod role;
mod schema;
mod server;
mod user;

pub use auth::Password;
pub use id::{ResourceId, ServerIds};
pub use role::{PermissionMask, RolePermission, RolePermissions};
pub use schema::Schema;
pub use server::{LogOptions, SERVER_PATCH_FIELDS, ServerAction, ServerPatch};
pub use user::{CraftyPermission, NewUser, UserPatch};

pub(crate) use user::role_ids;
