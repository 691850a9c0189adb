/// Console error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Command needs something the configured backend does not offer
    #[error("Not available with the {backend} backend: {what}")]
    Unsupported { backend: &'static str, what: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Client(#[from] siga_client::ClientError),
}
