//! Error types for the Crafty client.

use thiserror::Error;

/// Failure kinds reported by the panel through the `error` field of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelErrorKind {
    /// `INCORRECT_CREDENTIALS`
    InvalidCredentials,
    /// `SER_NOT_RUNNING`
    ServerNotRunning,
    /// `NO_COMMAND`
    MissingParameters,
    /// `SER_RUNNING`
    ServerAlreadyRunning,
    /// `NOT_AUTHORIZED` and `ACCESS_DENIED`
    AccessDenied,
    /// `NOT_ALLOWED`
    NotAllowed,
    /// `NOT_FOUND`
    ServerNotFound,
}

impl PanelErrorKind {
    /// Map a panel error code to its failure kind.
    ///
    /// Codes are matched case-sensitively. Unknown codes return `None` and
    /// are left for the caller to inspect on the envelope.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "INCORRECT_CREDENTIALS" => Some(Self::InvalidCredentials),
            "SER_NOT_RUNNING" => Some(Self::ServerNotRunning),
            "NO_COMMAND" => Some(Self::MissingParameters),
            "SER_RUNNING" => Some(Self::ServerAlreadyRunning),
            "NOT_AUTHORIZED" | "ACCESS_DENIED" => Some(Self::AccessDenied),
            "NOT_ALLOWED" => Some(Self::NotAllowed),
            "NOT_FOUND" => Some(Self::ServerNotFound),
            _ => None,
        }
    }

    /// Message used when the panel sends no detail of its own.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "Incorrect username or password",
            Self::ServerNotRunning => "Server is not running",
            Self::MissingParameters => {
                "Your request is missing essential parameters or they are invalid"
            }
            Self::ServerAlreadyRunning => "Server is already running",
            Self::AccessDenied => "Access denied",
            Self::NotAllowed => "Not allowed",
            Self::ServerNotFound => "Server not found",
        }
    }
}

impl std::fmt::Display for PanelErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.default_message())
    }
}

/// The main error type for the Crafty client.
#[derive(Error, Debug)]
pub enum Error {
    /// The panel answered with a recognized error code.
    #[error("{kind}{}", .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Panel {
        kind: PanelErrorKind,
        detail: Option<String>,
    },

    /// Argument rejected before any request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A dynamically typed argument had the wrong type.
    #[error("Expected '{field}' to be of type {expected}, but got {found} instead")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Role ids that do not exist on the panel.
    #[error("Invalid role(s): {}. Valid role(s): {}.", .invalid.join(", "), .valid.join(", "))]
    InvalidRoles {
        invalid: Vec<String>,
        valid: Vec<String>,
    },

    /// The panel answered with something the client cannot interpret.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed base URL or path
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors (password files, config files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a panel error of the given kind.
    pub fn panel(kind: PanelErrorKind, detail: Option<String>) -> Self {
        Self::Panel { kind, detail }
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a new type mismatch error.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            found: json_type_name(found),
        }
    }

    /// Create a new unexpected response error.
    pub fn unexpected_response(msg: impl Into<String>) -> Self {
        Self::UnexpectedResponse(msg.into())
    }

    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The panel failure kind, if this error came from a panel error code.
    pub fn panel_kind(&self) -> Option<PanelErrorKind> {
        match self {
            Self::Panel { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Check if this error was raised locally, before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_) | Self::TypeMismatch { .. } | Self::InvalidRoles { .. }
        )
    }
}

/// Name of a JSON value's type, for type mismatch messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(n) if n.is_f64() => "float",
        serde_json::Value::Number(_) => "int",
        serde_json::Value::String(_) => "str",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "dict",
    }
}
