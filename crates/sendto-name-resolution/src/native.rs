//! Native `.sol` domain resolution

use crate::{NativeDomainLookup, ResolverStrategy};
use async_trait::async_trait;
use sendto_core::{LookupStage, PublicKey, ResolutionLog, StrategyKind, NATIVE_SUFFIX};
use std::sync::Arc;

/// Extract the registry label from a native domain
///
/// Strips the lowercase `.sol` suffix and lowercases the label. Returns
/// `None` for inputs without the suffix, empty labels, nested labels or
/// whitespace.
pub fn native_label(domain: &str) -> Option<String> {
    let label = domain.strip_suffix(NATIVE_SUFFIX)?;

    if label.is_empty() || label.contains('.') || label.chars().any(char::is_whitespace) {
        return None;
    }

    Some(label.to_lowercase())
}

/// Native domain resolver
pub struct NativeDomainResolver {
    lookup: Arc<dyn NativeDomainLookup>,
    log: Arc<ResolutionLog>,
}

impl NativeDomainResolver {
    /// Create new resolver
    pub fn new(lookup: Arc<dyn NativeDomainLookup>, log: Arc<ResolutionLog>) -> Self {
        Self { lookup, log }
    }
}

#[async_trait]
impl ResolverStrategy for NativeDomainResolver {
    fn kind(&self) -> StrategyKind {
        StrategyKind::NativeDomain
    }

    async fn resolve(&self, input: &str) -> Option<PublicKey> {
        let Some(label) = native_label(input) else {
            tracing::debug!("Malformed native domain: {:?}", input);
            return None;
        };

        match self.lookup.resolve_native_domain(&label).await {
            Ok(Some(owner)) => Some(owner),
            Ok(None) => {
                tracing::debug!("Native domain {} is not registered", input);
                None
            }
            Err(e) => {
                self.log
                    .log_lookup_failed(LookupStage::NativeDomain, input, &e.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Result};
    use sendto_core::ResolutionEvent;
    use std::collections::HashMap;

    struct FakeLookup {
        names: HashMap<String, PublicKey>,
        fail: bool,
    }

    #[async_trait]
    impl NativeDomainLookup for FakeLookup {
        async fn resolve_native_domain(&self, name: &str) -> Result<Option<PublicKey>> {
            if self.fail {
                return Err(Error::Resolution("name service unavailable".to_string()));
            }
            Ok(self.names.get(name).copied())
        }
    }

    fn resolver(fail: bool) -> (NativeDomainResolver, Arc<ResolutionLog>) {
        let mut names = HashMap::new();
        names.insert("bonfida".to_string(), PublicKey::new([5u8; 32]));
        let log = Arc::new(ResolutionLog::default());
        let lookup = Arc::new(FakeLookup { names, fail });
        (NativeDomainResolver::new(lookup, log.clone()), log)
    }

    #[test]
    fn test_native_label() {
        assert_eq!(native_label("bonfida.sol"), Some("bonfida".to_string()));
        assert_eq!(native_label("Bonfida.sol"), Some("bonfida".to_string()));
        assert_eq!(native_label("Bonfida.SOL"), None);
        assert_eq!(native_label(".sol"), None);
        assert_eq!(native_label("a b.sol"), None);
        assert_eq!(native_label("bonfida.abc"), None);
    }

    #[tokio::test]
    async fn test_registered_name() {
        let (resolver, _) = resolver(false);
        assert_eq!(resolver.resolve("bonfida.sol").await, Some(PublicKey::new([5u8; 32])));
        assert_eq!(resolver.resolve("BONFIDA.sol").await, Some(PublicKey::new([5u8; 32])));
    }

    #[tokio::test]
    async fn test_unregistered_and_malformed_names() {
        let (resolver, log) = resolver(false);
        assert_eq!(resolver.resolve("nobody.sol").await, None);
        assert_eq!(resolver.resolve(".sol").await, None);
        // neither is a lookup failure
        assert!(log.failures().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_failure_is_absent_and_logged() {
        let (resolver, log) = resolver(true);
        assert_eq!(resolver.resolve("bonfida.sol").await, None);

        let failures = log.failures();
        assert_eq!(failures.len(), 1);
        assert!(matches!(
            &failures[0].event,
            ResolutionEvent::LookupFailed {
                stage: LookupStage::NativeDomain,
                input,
                ..
            } if input == "bonfida.sol"
        ));
    }
}
