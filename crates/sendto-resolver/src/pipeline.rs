//! Destination resolution pipeline
//!
//! classify -> resolver strategy -> token account lookup. Never fails: every
//! collaborator error is logged and becomes an absent field.

use crate::{ResolverConfig, Result};
use sendto_core::{
    classify, LookupStage, PublicKey, ResolutionLog, ResolutionResult, Strategy,
    TokenAccountFetcher, TokenAccountRecord,
};
use sendto_name_resolution::{NameResolver, NativeDomainLookup, StaticTldRegistry, TldRegistry};
use sendto_net::{RpcClient, RpcTokenAccountFetcher, SnsProxyClient};
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves one destination input
pub struct DestinationPipeline {
    names: NameResolver,
    tokens: Arc<dyn TokenAccountFetcher>,
    log: Arc<ResolutionLog>,
}

impl DestinationPipeline {
    /// Create pipeline from its parts
    pub fn new(
        names: NameResolver,
        tokens: Arc<dyn TokenAccountFetcher>,
        log: Arc<ResolutionLog>,
    ) -> Self {
        Self { names, tokens, log }
    }

    /// Create pipeline over the standard strategies
    pub fn with_collaborators(
        native: Arc<dyn NativeDomainLookup>,
        registry: Arc<dyn TldRegistry>,
        tokens: Arc<dyn TokenAccountFetcher>,
        log: Arc<ResolutionLog>,
    ) -> Self {
        Self::new(NameResolver::new(native, registry, log.clone()), tokens, log)
    }

    /// Wire network-backed collaborators from configuration
    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        config.validate()?;
        let network = &config.network;

        if !network.cluster.has_native_registry() {
            warn!(
                "Native domains resolve against mainnet registry data; cluster is {}",
                network.cluster
            );
        }

        let rpc = Arc::new(RpcClient::new(network)?);
        let sns = Arc::new(SnsProxyClient::new(network)?);
        let registry = Arc::new(StaticTldRegistry::from_entries(&config.tld_overrides)?);
        let log = Arc::new(ResolutionLog::new(config.event_log_capacity));

        // no live TLD registry client, only configured entries
        if registry.is_empty() {
            warn!("No tld_overrides configured; foreign-TLD domains will not resolve");
        }

        debug!(
            "Destination pipeline: rpc={} tld_overrides={}",
            rpc.url(),
            registry.len()
        );

        Ok(Self::with_collaborators(
            sns,
            registry,
            Arc::new(RpcTokenAccountFetcher::new(rpc)),
            log,
        ))
    }

    /// Shared event log
    pub fn log(&self) -> &Arc<ResolutionLog> {
        &self.log
    }

    /// Classify and resolve an input
    pub async fn resolve(&self, input: &str) -> ResolutionResult {
        let strategy = classify(input);
        self.resolve_classified(&strategy, input).await
    }

    /// Resolve an input whose classification is already known
    pub async fn resolve_classified(&self, strategy: &Strategy, input: &str) -> ResolutionResult {
        let public_key = self.names.resolve_classified(strategy, input).await;

        // no key, nothing to look up
        let token_account = match public_key {
            Some(key) => self.lookup_token_account(input, &key).await,
            None => None,
        };

        ResolutionResult::new(public_key, token_account)
    }

    /// Token account at `key`, failures mapped to `None`
    pub async fn lookup_token_account(
        &self,
        input: &str,
        key: &PublicKey,
    ) -> Option<TokenAccountRecord> {
        match self.tokens.fetch_token_account(key).await {
            Ok(account) => account,
            Err(e) => {
                self.log
                    .log_lookup_failed(LookupStage::TokenAccount, input, &e.to_string());
                None
            }
        }
    }
}
