//! Destination input classification
//!
//! Decides, without touching the network, which resolver strategy applies to
//! a raw destination string.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved suffix of the native naming registry
pub const NATIVE_SUFFIX: &str = ".sol";

/// Shortest input that is considered for domain resolution
pub const MIN_DOMAIN_INPUT_LEN: usize = 4;

/// Resolver strategy selected for an input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Decode the input as a base58 public key
    RawKey,
    /// Resolve through the native naming registry
    NativeDomain {
        /// Full domain as entered (`name.sol`)
        domain: String,
    },
    /// Resolve through the generic TLD registry
    ForeignTld {
        /// Full domain as entered (`name.tld`)
        domain: String,
        /// Extracted TLD including the leading dot (`.tld`)
        tld: String,
    },
}

impl Strategy {
    /// Strategy kind without its parameters
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::RawKey => StrategyKind::RawKey,
            Strategy::NativeDomain { .. } => StrategyKind::NativeDomain,
            Strategy::ForeignTld { .. } => StrategyKind::ForeignTld,
        }
    }
}

/// Parameterless strategy tag, used in logs and events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Raw public key
    RawKey,
    /// Native domain
    NativeDomain,
    /// Foreign TLD domain
    ForeignTld,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::RawKey => "raw_key",
            StrategyKind::NativeDomain => "native_domain",
            StrategyKind::ForeignTld => "foreign_tld",
        };
        f.write_str(name)
    }
}

/// Split `name.tld` into `("name", ".tld")`
///
/// Returns `None` when the input has no `.`.
pub fn split_domain_tld(domain: &str) -> Option<(&str, &str)> {
    let dot = domain.rfind('.')?;
    Some((&domain[..dot], &domain[dot..]))
}

/// Select the resolver strategy for a destination input
///
/// Inputs of at least [`MIN_DOMAIN_INPUT_LEN`] characters made of exactly two
/// `.`-separated segments are domains; everything else is a raw key.
pub fn classify(input: &str) -> Strategy {
    if input.chars().count() >= MIN_DOMAIN_INPUT_LEN && input.split('.').count() == 2 {
        if let Some((_, tld)) = split_domain_tld(input) {
            if tld == NATIVE_SUFFIX {
                return Strategy::NativeDomain {
                    domain: input.to_string(),
                };
            }
            return Strategy::ForeignTld {
                domain: input.to_string(),
                tld: tld.to_string(),
            };
        }
    }

    Strategy::RawKey
}
