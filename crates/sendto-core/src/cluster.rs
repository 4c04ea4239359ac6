//! Cluster definitions

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cluster the lookups run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cluster {
    /// Mainnet beta
    #[default]
    MainnetBeta,
    /// Devnet
    Devnet,
    /// Testnet
    Testnet,
    /// Local validator
    Localnet,
}

impl Cluster {
    /// Human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Cluster::MainnetBeta => "mainnet-beta",
            Cluster::Devnet => "devnet",
            Cluster::Testnet => "testnet",
            Cluster::Localnet => "localnet",
        }
    }

    /// Public RPC endpoint for the cluster
    pub const fn default_rpc_url(&self) -> &'static str {
        match self {
            Cluster::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::Localnet => "http://127.0.0.1:8899",
        }
    }

    /// Native domains are only registered on mainnet
    pub const fn has_native_registry(&self) -> bool {
        matches!(self, Cluster::MainnetBeta)
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Cluster {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet-beta" | "mainnet" => Ok(Cluster::MainnetBeta),
            "devnet" => Ok(Cluster::Devnet),
            "testnet" => Ok(Cluster::Testnet),
            "localnet" | "localhost" => Ok(Cluster::Localnet),
            other => Err(Error::Config(format!("Unknown cluster: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_names_roundtrip() {
        for cluster in [
            Cluster::MainnetBeta,
            Cluster::Devnet,
            Cluster::Testnet,
            Cluster::Localnet,
        ] {
            assert_eq!(cluster.name().parse::<Cluster>().unwrap(), cluster);
        }
        assert_eq!("mainnet".parse::<Cluster>().unwrap(), Cluster::MainnetBeta);
        assert!("moonnet".parse::<Cluster>().is_err());
    }

    #[test]
    fn test_cluster_serde() {
        let json = serde_json::to_string(&Cluster::MainnetBeta).unwrap();
        assert_eq!(json, "\"mainnet-beta\"");
        assert!(Cluster::MainnetBeta.has_native_registry());
        assert!(!Cluster::Devnet.has_native_registry());
    }
}
