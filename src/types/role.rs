//! Role permission strings.

use crate::error::{Error, Result};
use serde::Serialize;
use std::str::FromStr;

/// A single per-server permission a role can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RolePermission {
    Commands,
    Terminal,
    Logs,
    Schedule,
    Backup,
    Files,
    Config,
    Players,
}

impl RolePermission {
    /// All permissions, in mask order.
    pub const ALL: [RolePermission; 8] = [
        Self::Commands,
        Self::Terminal,
        Self::Logs,
        Self::Schedule,
        Self::Backup,
        Self::Files,
        Self::Config,
        Self::Players,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Eight binary digits, one per [`RolePermission`] in mask order.
///
/// `"10100000"` grants commands and logs, and denies everything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PermissionMask(String);

impl PermissionMask {
    /// Build a mask granting exactly the given permissions.
    pub fn from_permissions(granted: &[RolePermission]) -> Self {
        let mask = RolePermission::ALL
            .iter()
            .map(|p| if granted.contains(p) { '1' } else { '0' })
            .collect();
        Self(mask)
    }

    /// A mask granting every permission.
    pub fn all() -> Self {
        Self::from_permissions(&RolePermission::ALL)
    }

    /// Check whether the mask grants a permission.
    pub fn grants(&self, permission: RolePermission) -> bool {
        self.0.as_bytes()[permission.index()] == b'1'
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PermissionMask {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != 8 || !s.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(Error::invalid_argument(format!(
                "permissions must be a string of eight binary digits, got \"{s}\""
            )));
        }
        Ok(Self(s.to_string()))
    }
}

impl std::fmt::Display for PermissionMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Permissions for a role modification: one mask for every server, or one per server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RolePermissions {
    Same(PermissionMask),
    PerServer(Vec<PermissionMask>),
}

impl RolePermissions {
    /// Expand to exactly one mask per server.
    pub fn for_servers(self, server_count: usize) -> Result<Vec<PermissionMask>> {
        match self {
            Self::Same(mask) => Ok(vec![mask; server_count]),
            Self::PerServer(masks) if masks.len() == server_count => Ok(masks),
            Self::PerServer(masks) => Err(Error::invalid_argument(format!(
                "'server_ids' and 'permissions' must have the same length when both are lists \
                 ({} server ids, {} permissions)",
                server_count,
                masks.len()
            ))),
        }
    }
}

impl From<PermissionMask> for RolePermissions {
    fn from(mask: PermissionMask) -> Self {
        Self::Same(mask)
    }
}

impl From<Vec<PermissionMask>> for RolePermissions {
    fn from(masks: Vec<PermissionMask>) -> Self {
        Self::PerServer(masks)
    }
}
