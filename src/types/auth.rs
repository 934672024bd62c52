//! Login credentials.

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Where the login password comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum Password {
    /// The password itself.
    Literal(String),
    /// A file holding the password.
    File(PathBuf),
}

impl Password {
    /// Pick the password source from two optional inputs.
    ///
    /// Exactly one of them must be given.
    pub fn from_parts(password: Option<String>, password_file: Option<PathBuf>) -> Result<Self> {
        match (password, password_file) {
            (Some(password), None) => Ok(Self::Literal(password)),
            (None, Some(path)) => Ok(Self::File(path)),
            (None, None) => Err(Error::invalid_argument(
                "Must either have a password or path to the file where a password is saved",
            )),
            (Some(_), Some(_)) => Err(Error::invalid_argument(
                "Give either a password or a password file, not both",
            )),
        }
    }

    /// Produce the password text, reading the file if needed.
    ///
    /// A single trailing line ending is stripped from file contents.
    pub async fn resolve(&self) -> Result<String> {
        match self {
            Self::Literal(password) => Ok(password.clone()),
            Self::File(path) => {
                let mut contents = tokio::fs::read_to_string(path).await?;
                if contents.ends_with('\n') {
                    contents.pop();
                    if contents.ends_with('\r') {
                        contents.pop();
                    }
                }
                Ok(contents)
            }
        }
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(_) => f.write_str("Password::Literal(<redacted>)"),
            Self::File(path) => f.debug_tuple("Password::File").field(path).finish(),
        }
    }
}

impl From<&str> for Password {
    fn from(password: &str) -> Self {
        Self::Literal(password.to_string())
    }
}

impl From<String> for Password {
    fn from(password: String) -> Self {
        Self::Literal(password)
    }
}
