//! Error types

/// Network errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON-RPC error object returned by the node
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code
        code: i64,
        /// Error message
        message: String,
    },

    /// Response did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Core error
    #[error(transparent)]
    Core(#[from] sendto_core::Error),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for sendto_core::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Core(inner) => inner,
            Error::Config(msg) => sendto_core::Error::Config(msg),
            other => sendto_core::Error::Rpc(other.to_string()),
        }
    }
}

impl From<Error> for sendto_name_resolution::Error {
    fn from(e: Error) -> Self {
        sendto_name_resolution::Error::Resolution(e.to_string())
    }
}
