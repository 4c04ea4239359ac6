//! Resolver strategy and collaborator traits

use crate::Result;
use async_trait::async_trait;
use sendto_core::{PublicKey, StrategyKind};

/// Resolver strategy
///
/// Implementations never fail: malformed input and lookup errors both
/// resolve to `None`.
#[async_trait]
pub trait ResolverStrategy: Send + Sync {
    /// Strategy tag for logs
    fn kind(&self) -> StrategyKind;

    /// Resolve a destination input to a key
    async fn resolve(&self, input: &str) -> Option<PublicKey>;
}

/// Native naming registry lookup
#[async_trait]
pub trait NativeDomainLookup: Send + Sync {
    /// Resolve a lowercased name (without the `.sol` suffix) to its owner
    ///
    /// `Ok(None)` means the name is not registered.
    async fn resolve_native_domain(&self, name: &str) -> Result<Option<PublicKey>>;
}

/// Generic TLD registry client
#[async_trait]
pub trait TldRegistry: Send + Sync {
    /// Owner of a full `name.tld` domain
    ///
    /// `Ok(None)` means the domain is not registered.
    async fn get_owner_from_domain_tld(&self, domain: &str) -> Result<Option<PublicKey>>;
}
