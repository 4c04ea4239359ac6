//! In-memory collaborators for controller tests
#![allow(dead_code)]

use async_trait::async_trait;
use sendto_core::{
    AccountState, PublicKey, ResolutionEvent, ResolutionLog, TokenAccountFetcher,
    TokenAccountRecord, TokenProgram,
};
use sendto_name_resolution::{Error, NativeDomainLookup, TldRegistry};
use sendto_resolver::{DestinationController, DestinationPipeline};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const QUIET_PERIOD: Duration = Duration::from_millis(500);

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

pub fn key(byte: u8) -> PublicKey {
    PublicKey::new([byte; 32])
}

pub fn token_account(address: PublicKey) -> TokenAccountRecord {
    TokenAccountRecord {
        address,
        owner: key(200),
        mint: key(201),
        amount: 5_000_000,
        state: AccountState::Initialized,
        program: TokenProgram::Legacy,
    }
}

/// Native names with per-name latency
#[derive(Default)]
pub struct FakeNames {
    entries: HashMap<String, (Duration, Option<PublicKey>)>,
    pub calls: AtomicUsize,
}

impl FakeNames {
    pub fn with(mut self, name: &str, delay: Duration, owner: Option<PublicKey>) -> Self {
        self.entries.insert(name.to_string(), (delay, owner));
        self
    }
}

#[async_trait]
impl NativeDomainLookup for FakeNames {
    async fn resolve_native_domain(
        &self,
        name: &str,
    ) -> sendto_name_resolution::Result<Option<PublicKey>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.entries.get(name) {
            Some((delay, owner)) => {
                tokio::time::sleep(*delay).await;
                Ok(*owner)
            }
            None => Ok(None),
        }
    }
}

/// TLD registry that can be told to throw for some domains
#[derive(Default)]
pub struct FakeRegistry {
    owners: HashMap<String, PublicKey>,
    failing: HashSet<String>,
}

impl FakeRegistry {
    pub fn with(mut self, domain: &str, owner: PublicKey) -> Self {
        self.owners.insert(domain.to_string(), owner);
        self
    }

    pub fn failing(mut self, domain: &str) -> Self {
        self.failing.insert(domain.to_string());
        self
    }
}

#[async_trait]
impl TldRegistry for FakeRegistry {
    async fn get_owner_from_domain_tld(
        &self,
        domain: &str,
    ) -> sendto_name_resolution::Result<Option<PublicKey>> {
        if self.failing.contains(domain) {
            return Err(Error::Resolution("registry exception".to_string()));
        }
        Ok(self.owners.get(domain).copied())
    }
}

/// Token accounts keyed by address, counting calls
#[derive(Default)]
pub struct FakeTokens {
    accounts: HashMap<PublicKey, TokenAccountRecord>,
    pub calls: AtomicUsize,
}

impl FakeTokens {
    pub fn with(mut self, account: TokenAccountRecord) -> Self {
        self.accounts.insert(account.address, account);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenAccountFetcher for FakeTokens {
    async fn fetch_token_account(
        &self,
        key: &PublicKey,
    ) -> sendto_core::Result<Option<TokenAccountRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.accounts.get(key).cloned())
    }
}

pub struct Harness {
    pub controller: DestinationController,
    pub names: Arc<FakeNames>,
    pub tokens: Arc<FakeTokens>,
    pub log: Arc<ResolutionLog>,
}

pub fn harness(names: FakeNames, registry: FakeRegistry, tokens: FakeTokens) -> Harness {
    let names = Arc::new(names);
    let tokens = Arc::new(tokens);
    let log = Arc::new(ResolutionLog::default());

    let pipeline = DestinationPipeline::with_collaborators(
        names.clone(),
        Arc::new(registry),
        tokens.clone(),
        log.clone(),
    );

    Harness {
        controller: DestinationController::new(Arc::new(pipeline), QUIET_PERIOD),
        names,
        tokens,
        log,
    }
}

pub fn started_count(log: &ResolutionLog) -> usize {
    log.events()
        .iter()
        .filter(|e| matches!(e, ResolutionEvent::Started { .. }))
        .count()
}

pub fn resolved_count(log: &ResolutionLog) -> usize {
    log.events()
        .iter()
        .filter(|e| matches!(e, ResolutionEvent::Resolved { .. }))
        .count()
}
