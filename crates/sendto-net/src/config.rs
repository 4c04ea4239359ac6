//! Network configuration

use crate::{Error, Result};
use sendto_core::Cluster;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public proxy for the native naming registry
pub const DEFAULT_SNS_PROXY_URL: &str = "https://sns-sdk-proxy.bonfida.workers.dev";

/// Per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Commitment level for account reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    /// Processed
    Processed,
    /// Confirmed (default)
    #[default]
    Confirmed,
    /// Finalized
    Finalized,
}

impl Commitment {
    /// JSON-RPC name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }
}

/// Persistent network configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Cluster
    pub cluster: Cluster,
    /// RPC endpoint override (cluster default when unset)
    pub rpc_url: Option<String>,
    /// Native naming registry proxy
    pub sns_proxy_url: String,
    /// Commitment for account reads
    pub commitment: Commitment,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            cluster: Cluster::default(),
            rpc_url: None,
            sns_proxy_url: DEFAULT_SNS_PROXY_URL.to_string(),
            commitment: Commitment::default(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl NetworkConfig {
    /// Effective RPC endpoint
    pub fn rpc_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .unwrap_or_else(|| self.cluster.default_rpc_url())
    }

    /// Request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Check URLs and timeout
    pub fn validate(&self) -> Result<()> {
        let urls = [
            ("rpc_url", self.rpc_url()),
            ("sns_proxy_url", self.sns_proxy_url.as_str()),
        ];
        for (name, url) in urls {
            let parsed = reqwest::Url::parse(url)
                .map_err(|e| Error::Config(format!("{} {:?}: {}", name, url, e)))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(Error::Config(format!("{} must be http(s): {}", name, url)));
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(Error::Config("request_timeout_secs must be positive".to_string()));
        }

        Ok(())
    }
}
