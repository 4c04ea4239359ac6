//! Error types for sendto core
//!
//! Errors only travel between collaborators and the resolver strategies.
//! The resolution pipeline maps every one of them to an absent destination.

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// sendto core errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid public key encoding
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Account data does not decode as a token account
    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),

    /// RPC node error
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}
