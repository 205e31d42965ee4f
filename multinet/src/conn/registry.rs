//! Id-keyed store for provider and signer handles.
//!
//! [`ConnectionRegistry`] holds, per domain id, at most one provider and at
//! most one signer, and maintains the consistency rule that a stored signer
//! always has a discoverable provider. It operates on already-resolved
//! [`DomainId`]s only; name resolution belongs to
//! [`DomainDirectory`](crate::DomainDirectory) and is performed by the
//! [`Multinet`](crate::Multinet) facade before calls land here.

use std::collections::HashMap;
use std::sync::Arc;

use super::handle::{Connection, Provider, Rebind, Signer};
use crate::domain::DomainId;
use crate::error::{EntityKind, Error};

/// Per-domain provider and signer slots.
///
/// Handles are shared (`Arc`), not exclusively owned: the same provider may
/// sit in a domain's provider slot and inside its signer at once. The
/// registry only tracks which handle is *current* for a domain.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    providers: HashMap<DomainId, Arc<dyn Provider>>,
    signers: HashMap<DomainId, Arc<dyn Signer>>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `provider` as the domain's read connection, replacing any
    /// previous one.
    ///
    /// An already-registered signer is rebound to the new provider. When the
    /// signer does not support rebinding, or rebinding fails, the stale
    /// signer is dropped rather than left pointing at a defunct provider.
    pub fn register_provider(&mut self, domain: DomainId, provider: Arc<dyn Provider>) {
        if let Some(signer) = self.signers.remove(&domain) {
            match signer.rebind(&provider) {
                Rebind::Bound(rebound) => {
                    self.signers.insert(domain, rebound);
                }
                Rebind::Unsupported => {
                    tracing::warn!(domain, "signer does not support rebinding; dropping it");
                }
                Rebind::Failed(reason) => {
                    tracing::warn!(domain, %reason, "signer rebind failed; dropping it");
                }
            }
        }
        tracing::debug!(domain, "registering provider");
        self.providers.insert(domain, provider);
    }

    /// Registers `signer` as the domain's signing connection.
    ///
    /// Prefers binding the signer to an already-registered provider, so the
    /// registry stays the authority on which provider a domain uses. Only
    /// when that is impossible does the signer's own carried provider get
    /// promoted into the provider slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingProvider`] when neither a registered provider
    /// nor a signer-carried provider exists, or
    /// [`Error::SignerHasNoProvider`] when rebinding to the registered
    /// provider fell through and the signer carries no provider of its own.
    pub fn register_signer(
        &mut self,
        domain: DomainId,
        signer: Arc<dyn Signer>,
    ) -> Result<(), Error> {
        let carried = signer.provider();
        let registered = self.providers.get(&domain);
        if registered.is_none() && carried.is_none() {
            return Err(Error::MissingProvider(domain));
        }

        if let Some(provider) = registered {
            match signer.rebind(provider) {
                Rebind::Bound(bound) => {
                    tracing::debug!(domain, "registering signer bound to current provider");
                    self.signers.insert(domain, bound);
                    return Ok(());
                }
                Rebind::Unsupported => {}
                Rebind::Failed(reason) => {
                    tracing::debug!(domain, %reason, "signer rebind failed; using carried provider");
                }
            }
        }

        let Some(own) = carried else {
            return Err(Error::SignerHasNoProvider(domain));
        };
        tracing::debug!(domain, "registering signer with its carried provider");
        self.providers.insert(domain, own);
        self.signers.insert(domain, signer);
        Ok(())
    }

    /// Removes the domain's signer, if any.
    ///
    /// When no provider slot is occupied, the removed signer's provider is
    /// promoted into it so read access survives the signer's removal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvariantViolation`] when the stored signer has no
    /// provider reference. That state cannot be produced through this
    /// registry's operations; it signals a consistency bug, not a caller
    /// error.
    pub fn unregister_signer(&mut self, domain: DomainId) -> Result<(), Error> {
        let Some(signer) = self.signers.get(&domain) else {
            return Ok(());
        };
        let provider = signer.provider().ok_or_else(|| {
            Error::InvariantViolation(format!(
                "stored signer for domain {domain} has no provider reference"
            ))
        })?;
        self.signers.remove(&domain);
        self.providers.entry(domain).or_insert(provider);
        tracing::debug!(domain, "unregistered signer");
        Ok(())
    }

    /// Removes every registered signer, domain by domain.
    ///
    /// Each removal is independent and applies
    /// [`unregister_signer`](Self::unregister_signer)'s provider-preservation
    /// rule for its domain.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::InvariantViolation`] encountered.
    pub fn clear_signers(&mut self) -> Result<(), Error> {
        let domains: Vec<DomainId> = self.signers.keys().copied().collect();
        for domain in domains {
            self.unregister_signer(domain)?;
        }
        Ok(())
    }

    /// The domain's registered provider, if any.
    #[must_use]
    pub fn provider(&self, domain: DomainId) -> Option<Arc<dyn Provider>> {
        self.providers.get(&domain).cloned()
    }

    /// The domain's registered provider.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] with kind `Provider` when absent.
    pub fn must_provider(&self, domain: DomainId) -> Result<Arc<dyn Provider>, Error> {
        self.provider(domain)
            .ok_or(Error::not_found(EntityKind::Provider, domain))
    }

    /// The domain's registered signer, if any.
    #[must_use]
    pub fn signer(&self, domain: DomainId) -> Option<Arc<dyn Signer>> {
        self.signers.get(&domain).cloned()
    }

    /// The domain's registered signer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] with kind `Signer` when absent.
    pub fn must_signer(&self, domain: DomainId) -> Result<Arc<dyn Signer>, Error> {
        self.signer(domain)
            .ok_or(Error::not_found(EntityKind::Signer, domain))
    }

    /// The best available connection: the signer when registered, else the
    /// provider, else `None`.
    #[must_use]
    pub fn connection(&self, domain: DomainId) -> Option<Connection> {
        self.signer(domain)
            .map(Connection::Signer)
            .or_else(|| self.provider(domain).map(Connection::Provider))
    }

    /// The best available connection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionNotFound`] when neither a signer nor a
    /// provider is registered.
    pub fn must_connection(&self, domain: DomainId) -> Result<Connection, Error> {
        self.connection(domain)
            .ok_or(Error::ConnectionNotFound(domain))
    }

    /// The signer's derived address, or `None` when no signer is registered.
    ///
    /// # Errors
    ///
    /// Surfaces the external derivation failure unchanged.
    pub async fn address(&self, domain: DomainId) -> Result<Option<String>, Error> {
        match self.signer(domain) {
            Some(signer) => signer.address().await.map(Some),
            None => Ok(None),
        }
    }

    /// Domain ids currently holding a signer, in no particular order.
    #[must_use]
    pub fn signer_domains(&self) -> Vec<DomainId> {
        self.signers.keys().copied().collect()
    }
}
