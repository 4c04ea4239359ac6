//! Raw public key resolution

use crate::ResolverStrategy;
use async_trait::async_trait;
use sendto_core::{PublicKey, StrategyKind};

/// Decodes the input as a base58 public key
#[derive(Debug, Clone, Copy, Default)]
pub struct RawKeyResolver;

impl RawKeyResolver {
    /// Create new resolver
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResolverStrategy for RawKeyResolver {
    fn kind(&self) -> StrategyKind {
        StrategyKind::RawKey
    }

    async fn resolve(&self, input: &str) -> Option<PublicKey> {
        let key = PublicKey::try_parse(input);
        if key.is_none() {
            tracing::debug!("Not a valid public key: {:?}", input);
        }
        key
    }
}
