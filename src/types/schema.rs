//! JSON schema names served under `/jsonschema`.

use crate::error::{Error, Result};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Schema {
    Login,
    ModifyRole,
    CreateRole,
    ServerPatch,
    NewServer,
    UserPatch,
    NewUser,
    NewTask,
    PatchTask,
}

impl Schema {
    pub const ALL: [Schema; 9] = [
        Self::Login,
        Self::ModifyRole,
        Self::CreateRole,
        Self::ServerPatch,
        Self::NewServer,
        Self::UserPatch,
        Self::NewUser,
        Self::NewTask,
        Self::PatchTask,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::ModifyRole => "modify_role",
            Self::CreateRole => "create_role",
            Self::ServerPatch => "server_patch",
            Self::NewServer => "new_server",
            Self::UserPatch => "user_patch",
            Self::NewUser => "new_user",
            Self::NewTask => "new_task",
            Self::PatchTask => "patch_task",
        }
    }
}

impl FromStr for Schema {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|schema| schema.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|s| s.as_str()).collect();
                Error::invalid_argument(format!(
                    "Invalid schema \"{s}\". Must be one of the following: {}",
                    valid.join(", ")
                ))
            })
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_nine_names_parse() {
        for schema in Schema::ALL {
            assert_eq!(schema.as_str().parse::<Schema>().unwrap(), schema);
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        for bad in ["new_role", "LOGIN", "", "server"] {
            assert!(bad.parse::<Schema>().unwrap_err().is_validation(), "{bad}");
        }
    }
}
