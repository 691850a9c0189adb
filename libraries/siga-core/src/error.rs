/// Core error types for SIGA
use thiserror::Error;

/// Result type alias using `SigaError`
pub type Result<T> = std::result::Result<T, SigaError>;

/// Core error type for SIGA
#[derive(Error, Debug)]
pub enum SigaError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Authentication failed or was rejected by the provider
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The backend requires a session and none was supplied
    #[error("Authentication required")]
    AuthRequired,

    /// Network error (REST backend)
    #[error("Network error: {0}")]
    Network(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl SigaError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Whether this error came from the authentication collaborator
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_) | Self::AuthRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = SigaError::not_found("member", "m9");
        assert_eq!(err.to_string(), "member not found: m9");
    }

    #[test]
    fn auth_errors_are_classified() {
        assert!(SigaError::auth("bad password").is_auth());
        assert!(SigaError::AuthRequired.is_auth());
        assert!(!SigaError::storage("disk full").is_auth());
    }
}
