use crate::coordinates::CellCoord;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Opaque identity of whoever a container is being placed for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor(String);

impl Actor {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{provider}: {reason}")]
pub struct Denial {
    pub provider: String,
    pub reason: String,
}

impl Denial {
    pub fn new(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            reason: reason.into(),
        }
    }
}

/// A land-claim or region-protection system that may veto placement.
pub trait AuthorizationProvider {
    fn name(&self) -> &str;

    /// Providers whose backing system is absent are skipped by the chain.
    fn is_available(&self) -> bool {
        true
    }

    fn check(&self, actor: &Actor, cell: &CellCoord) -> Result<(), Denial>;
}

struct ChainEntry {
    provider: Box<dyn AuthorizationProvider + Send + Sync>,
    enabled: bool,
}

/// Ordered providers combined with AND semantics.
#[derive(Default)]
pub struct AuthorizationChain {
    entries: Vec<ChainEntry>,
}

impl AuthorizationChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<P>(&mut self, provider: P, enabled: bool)
    where
        P: AuthorizationProvider + Send + Sync + 'static,
    {
        self.entries.push(ChainEntry {
            provider: Box::new(provider),
            enabled,
        });
    }

    pub fn with<P>(mut self, provider: P, enabled: bool) -> Self
    where
        P: AuthorizationProvider + Send + Sync + 'static,
    {
        self.push(provider, enabled);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn provider_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.provider.name())
    }

    /// Returns the first denial from an enabled, available provider.
    pub fn first_denial(&self, actor: &Actor, cell: &CellCoord) -> Option<Denial> {
        self.entries
            .iter()
            .filter(|entry| entry.enabled && entry.provider.is_available())
            .find_map(|entry| entry.provider.check(actor, cell).err())
    }

    pub fn authorize(&self, actor: &Actor, cell: &CellCoord) -> bool {
        match self.first_denial(actor, cell) {
            Some(denial) => {
                tracing::info!(
                    actor = %actor,
                    cell = %cell,
                    provider = %denial.provider,
                    "placement denied: {}",
                    denial.reason
                );
                false
            }
            None => true,
        }
    }
}

impl fmt::Debug for AuthorizationChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.entries
                    .iter()
                    .map(|entry| (entry.provider.name(), entry.enabled)),
            )
            .finish()
    }
}
