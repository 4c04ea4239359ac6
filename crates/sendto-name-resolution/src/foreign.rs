//! Foreign-TLD domain resolution

use crate::{ResolverStrategy, TldRegistry};
use async_trait::async_trait;
use sendto_core::{LookupStage, PublicKey, ResolutionLog, StrategyKind};
use std::sync::Arc;

/// Foreign-TLD resolver
///
/// Any registry failure (network, unsupported TLD, registry fault) is logged
/// and resolves to `None`.
pub struct ForeignTldResolver {
    registry: Arc<dyn TldRegistry>,
    log: Arc<ResolutionLog>,
}

impl ForeignTldResolver {
    /// Create new resolver
    pub fn new(registry: Arc<dyn TldRegistry>, log: Arc<ResolutionLog>) -> Self {
        Self { registry, log }
    }
}

#[async_trait]
impl ResolverStrategy for ForeignTldResolver {
    fn kind(&self) -> StrategyKind {
        StrategyKind::ForeignTld
    }

    async fn resolve(&self, input: &str) -> Option<PublicKey> {
        match self.registry.get_owner_from_domain_tld(input).await {
            Ok(owner) => owner,
            Err(e) => {
                self.log
                    .log_lookup_failed(LookupStage::ForeignTld, input, &e.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Result, StaticTldRegistry};

    struct BrokenRegistry;

    #[async_trait]
    impl TldRegistry for BrokenRegistry {
        async fn get_owner_from_domain_tld(&self, _domain: &str) -> Result<Option<PublicKey>> {
            Err(Error::Resolution("connection reset".to_string()))
        }
    }

    #[tokio::test]
    async fn test_registry_owner() {
        let owner = PublicKey::new([8u8; 32]);
        let mut registry = StaticTldRegistry::new();
        registry.insert("miester.abc", owner);

        let log = Arc::new(ResolutionLog::default());
        let resolver = ForeignTldResolver::new(Arc::new(registry), log.clone());

        assert_eq!(resolver.resolve("miester.abc").await, Some(owner));
        assert_eq!(resolver.resolve("nobody.abc").await, None);
        assert!(log.failures().is_empty());
    }

    #[tokio::test]
    async fn test_registry_failure_fails_closed() {
        let log = Arc::new(ResolutionLog::default());
        let resolver = ForeignTldResolver::new(Arc::new(BrokenRegistry), log.clone());

        assert_eq!(resolver.resolve("miester.abc").await, None);
        assert_eq!(log.failures().len(), 1);

        // later lookups still run
        assert_eq!(resolver.resolve("other.abc").await, None);
        assert_eq!(log.failures().len(), 2);
    }
}
