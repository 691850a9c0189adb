//! Error types for the REST backend client.

use siga_core::SigaError;
use thiserror::Error;

/// Errors that can occur when talking to a SIGA backend.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// The backend wants a session token
    #[error("Authentication required")]
    AuthRequired,

    /// Invalid backend URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse backend response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Backend is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl ClientError {
    /// Classify a transport failure
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::ServerUnreachable(err.to_string())
        } else {
            Self::Request(err)
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

impl From<ClientError> for SigaError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::AuthRequired => SigaError::AuthRequired,
            ClientError::InvalidUrl(msg) => SigaError::invalid_input(msg),
            ClientError::ServerError { status: 400 | 422, message } => {
                SigaError::invalid_input(message)
            }
            other @ (ClientError::Request(_) | ClientError::ServerUnreachable(_)) => {
                SigaError::Network(other.to_string())
            }
            other => SigaError::Other(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_required_stays_an_auth_error() {
        let err: SigaError = ClientError::AuthRequired.into();
        assert!(err.is_auth());
    }

    #[test]
    fn rejected_payload_becomes_invalid_input() {
        let err: SigaError = ClientError::ServerError {
            status: 422,
            message: "amount must be positive".to_string(),
        }
        .into();
        assert!(matches!(err, SigaError::InvalidInput(m) if m == "amount must be positive"));
    }

    #[test]
    fn unreachable_backend_is_a_network_error() {
        let err: SigaError = ClientError::ServerUnreachable("refused".to_string()).into();
        assert!(matches!(err, SigaError::Network(_)));

        let err: SigaError = ClientError::ServerError {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Server error (500): boom");
    }
}
