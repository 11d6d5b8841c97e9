//! Authentication error types.

use thiserror::Error;

/// Field-level validation failure reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Authentication errors
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Login rejected by the server (HTTP 400/401). The message is the
    /// server's own wording and is shown to the user verbatim.
    #[error("{0}")]
    InvalidCredentials(String),

    /// Registration rejected with field-level messages
    #[error("{message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },

    /// Stored access token rejected by the server
    #[error("Session expired")]
    Unauthorized,

    /// Request never reached the server or the connection failed
    #[error("Network error: {0}")]
    Transport(String),

    /// Server responded outside the documented contract
    #[error("Unexpected server response: {0}")]
    Protocol(String),

    /// A same-kind operation is already in flight
    #[error("Another {0} attempt is already in progress")]
    OperationInFlight(&'static str),

    /// The session changed (logout or external invalidation) while this
    /// operation was in flight; its result was discarded.
    #[error("Operation superseded by a newer session change")]
    Superseded,
}

impl AuthError {
    /// User-facing message for this error.
    ///
    /// Credential and validation messages come from the server and pass
    /// through verbatim. Transport and protocol details are sanitized so
    /// connection strings and parser noise never reach the UI.
    pub fn client_message(&self) -> String {
        match self {
            AuthError::Transport(_) => "Unable to reach the server".to_string(),
            AuthError::Protocol(_) => "The server returned an unexpected response".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
