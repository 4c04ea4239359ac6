//! Network collaborators for destination resolution
//!
//! Provides a JSON-RPC client for token account lookups and an HTTP client
//! for the native naming registry proxy.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod rpc;
pub mod sns;
pub mod token_accounts;

pub use config::{Commitment, NetworkConfig, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SNS_PROXY_URL};
pub use error::{Error, Result};
pub use rpc::{AccountInfo, RpcClient};
pub use sns::SnsProxyClient;
pub use token_accounts::{token_account_from_info, RpcTokenAccountFetcher};
