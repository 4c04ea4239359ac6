//! Error types for controller setup

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types
///
/// Only construction and configuration can fail; resolution itself settles
/// into a present or absent destination.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Core error
    #[error(transparent)]
    Core(#[from] sendto_core::Error),

    /// Name resolution setup error
    #[error(transparent)]
    Names(#[from] sendto_name_resolution::Error),

    /// Network client error
    #[error(transparent)]
    Net(#[from] sendto_net::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
