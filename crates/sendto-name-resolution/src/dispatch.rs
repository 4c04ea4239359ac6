//! Strategy dispatch

use crate::{
    ForeignTldResolver, NativeDomainLookup, NativeDomainResolver, RawKeyResolver, ResolverStrategy,
    TldRegistry,
};
use sendto_core::{classify, PublicKey, ResolutionLog, Strategy};
use std::sync::Arc;

/// Routes classified inputs to the matching resolver strategy
#[derive(Clone)]
pub struct NameResolver {
    raw: Arc<dyn ResolverStrategy>,
    native: Arc<dyn ResolverStrategy>,
    foreign: Arc<dyn ResolverStrategy>,
}

impl NameResolver {
    /// Build the standard strategy set over the given collaborators
    pub fn new(
        native: Arc<dyn NativeDomainLookup>,
        registry: Arc<dyn TldRegistry>,
        log: Arc<ResolutionLog>,
    ) -> Self {
        Self {
            raw: Arc::new(RawKeyResolver::new()),
            native: Arc::new(NativeDomainResolver::new(native, log.clone())),
            foreign: Arc::new(ForeignTldResolver::new(registry, log)),
        }
    }

    /// Strategy for a classification
    pub fn strategy_for(&self, strategy: &Strategy) -> &Arc<dyn ResolverStrategy> {
        match strategy {
            Strategy::RawKey => &self.raw,
            Strategy::NativeDomain { .. } => &self.native,
            Strategy::ForeignTld { .. } => &self.foreign,
        }
    }

    /// Resolve an input with an already computed classification
    pub async fn resolve_classified(&self, strategy: &Strategy, input: &str) -> Option<PublicKey> {
        let target = match strategy {
            Strategy::RawKey => input,
            Strategy::NativeDomain { domain } | Strategy::ForeignTld { domain, .. } => {
                domain.as_str()
            }
        };
        self.strategy_for(strategy).resolve(target).await
    }

    /// Classify and resolve an input
    pub async fn resolve(&self, input: &str) -> Option<PublicKey> {
        let strategy = classify(input);
        self.resolve_classified(&strategy, input).await
    }
}
