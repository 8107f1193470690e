//! Error types for the Roomly client core.

use thiserror::Error;

/// A shared error type for the Roomly client core.
///
/// Every failure crossing a component boundary is classified into one of
/// these variants before it reaches any UI collaborator; raw transport
/// errors never escape the client layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoomlyError {
    /// Credentials rejected by the server (401-class).
    #[error("Incorrect credentials")]
    AuthInvalid,

    /// Input rejected before any network call (missing fields,
    /// password mismatch, malformed session material).
    #[error("{0}")]
    Validation(String),

    /// A profile edit was submitted with nothing modified.
    #[error("Change at least one information")]
    NothingToSync,

    /// Duplicate email/username on sign-up, surfaced verbatim from the
    /// server when recognized.
    #[error("{0}")]
    Conflict(String),

    /// Any other network/server failure. The detail is kept for logs;
    /// users see a generic message via [`RoomlyError::user_message`].
    #[error("Server error: {0}")]
    Server(String),

    /// Durable credential storage failed. Never fatal: in-memory session
    /// state remains the source of truth for the current process.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl RoomlyError {
    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates a Server error
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(message.into())
    }

    /// Creates a Persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }

    /// Check if this error means the current credential was rejected.
    pub fn is_auth_invalid(&self) -> bool {
        matches!(self, Self::AuthInvalid)
    }

    /// The message suitable for direct display to the user.
    ///
    /// Server and persistence failures deliberately collapse to a generic
    /// message; their detail stays available through `Display` for logging.
    pub fn user_message(&self) -> String {
        match self {
            Self::AuthInvalid => "Incorrect credentials".to_string(),
            Self::Validation(message) => message.clone(),
            Self::NothingToSync => "Change at least one information".to_string(),
            Self::Conflict(message) => message.clone(),
            Self::Server(_) | Self::Persistence(_) => "An error occurred".to_string(),
        }
    }
}

impl From<std::io::Error> for RoomlyError {
    fn from(err: std::io::Error) -> Self {
        Self::Persistence(format!("{} (kind: {:?})", err, err.kind()))
    }
}

/// A type alias for `Result<T, RoomlyError>`.
pub type Result<T> = std::result::Result<T, RoomlyError>;
