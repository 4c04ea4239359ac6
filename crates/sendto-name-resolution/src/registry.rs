//! In-memory TLD registry

use crate::{Error, Result, TldRegistry};
use async_trait::async_trait;
use sendto_core::{split_domain_tld, PublicKey};
use std::collections::HashMap;

/// TLD registry backed by a fixed `domain -> owner` table
///
/// Domains are matched case-insensitively. Unknown domains are unregistered.
#[derive(Debug, Clone, Default)]
pub struct StaticTldRegistry {
    owners: HashMap<String, PublicKey>,
}

impl StaticTldRegistry {
    /// Create empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(domain, base58 owner)` pairs
    pub fn from_entries<I, D, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (D, K)>,
        D: AsRef<str>,
        K: AsRef<str>,
    {
        let mut registry = Self::new();
        for (domain, owner) in entries {
            let domain = domain.as_ref();
            if split_domain_tld(domain).is_none() {
                return Err(Error::InvalidName(format!("missing TLD: {}", domain)));
            }
            let owner: PublicKey = owner.as_ref().parse()?;
            registry.insert(domain, owner);
        }
        Ok(registry)
    }

    /// Register a domain owner
    pub fn insert(&mut self, domain: &str, owner: PublicKey) {
        self.owners.insert(domain.to_lowercase(), owner);
    }

    /// Number of registered domains
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// No domains registered
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[async_trait]
impl TldRegistry for StaticTldRegistry {
    async fn get_owner_from_domain_tld(&self, domain: &str) -> Result<Option<PublicKey>> {
        Ok(self.owners.get(&domain.to_lowercase()).copied())
    }
}
