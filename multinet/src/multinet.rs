//! The registry facade tying the three id-keyed subsystems together.
//!
//! [`Multinet`] owns a [`DomainDirectory`], a [`ConnectionRegistry`], and a
//! [`PolicyStore`], and exposes the public name-or-id API. Every operation
//! first resolves its [`DomainRef`] through the directory, then delegates to
//! the id-keyed subsystem; the directory is the only component that ever sees
//! a name.

use std::sync::Arc;

use crate::conn::{Connection, ConnectionRegistry, Provider, Signer};
use crate::domain::{Domain, DomainDirectory, DomainId, DomainRef};
use crate::error::Error;
use crate::policy::{Overrides, PolicyStore};

/// Registry of domains, their connections, and their transaction policy.
///
/// Explicitly constructed and explicitly passed; there is no process-global
/// instance. All mutation goes through `&mut self`, so the owner decides how
/// (and whether) concurrent access is serialised — the registry itself takes
/// no locks. Compound operations such as "register provider, then rebind the
/// existing signer" are observable as separate steps, not one transaction.
#[derive(Debug, Default)]
pub struct Multinet {
    directory: DomainDirectory,
    connections: ConnectionRegistry,
    policy: PolicyStore,
}

impl Multinet {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Domain directory ────────────────────────────────────────────────

    /// Registers a domain, overwriting any entry with the same id.
    pub fn register_domain(&mut self, domain: Domain) {
        self.directory.register(domain);
    }

    /// Resolves a name-or-id reference to the canonical domain id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DomainNotFound`] for an unknown name.
    pub fn resolve_domain(&self, domain: impl Into<DomainRef>) -> Result<DomainId, Error> {
        self.directory.resolve(domain)
    }

    /// Whether [`resolve_domain`](Self::resolve_domain) would succeed.
    #[must_use]
    pub fn known_domain(&self, domain: impl Into<DomainRef>) -> bool {
        self.directory.known(domain)
    }

    /// The registered domain for a reference, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DomainNotFound`] for an unresolvable name.
    pub fn get_domain(&self, domain: impl Into<DomainRef>) -> Result<Option<&Domain>, Error> {
        self.directory.get(domain)
    }

    /// The registered domain for a reference, failing when absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DomainNotFound`] or [`Error::NotFound`] with kind
    /// `Domain`.
    pub fn must_get_domain(&self, domain: impl Into<DomainRef>) -> Result<&Domain, Error> {
        self.directory.must_get(domain)
    }

    /// All registered domain ids, in registration order.
    #[must_use]
    pub fn domain_ids(&self) -> Vec<DomainId> {
        self.directory.ids()
    }

    /// All registered domain names, in registration order.
    #[must_use]
    pub fn domain_names(&self) -> Vec<&str> {
        self.directory.names()
    }

    /// All registered domain ids except the referenced one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DomainNotFound`] when `exclude` is an unresolvable
    /// name.
    pub fn remote_domain_ids(
        &self,
        exclude: impl Into<DomainRef>,
    ) -> Result<Vec<DomainId>, Error> {
        self.directory.remote_ids(exclude)
    }

    // ── Connections ─────────────────────────────────────────────────────

    /// Registers the domain's read connection, replacing any previous one.
    ///
    /// The domain must already be registered in the directory. An existing
    /// signer is rebound to the new provider, or dropped when rebinding is
    /// unsupported or fails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DomainNotFound`] for an unknown name, or
    /// [`Error::NotFound`] with kind `Domain` for an unregistered id.
    pub fn register_provider(
        &mut self,
        domain: impl Into<DomainRef>,
        provider: Arc<dyn Provider>,
    ) -> Result<(), Error> {
        let id = self.directory.must_get(domain)?.id;
        self.connections.register_provider(id, provider);
        Ok(())
    }

    /// Registers the domain's signing connection.
    ///
    /// Prefers binding the signer to the already-registered provider; falls
    /// back to the signer's own carried provider, which then also becomes
    /// the domain's provider.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DomainNotFound`] for an unknown name,
    /// [`Error::MissingProvider`] when no provider is available from either
    /// side, or [`Error::SignerHasNoProvider`] when the rebind fallback
    /// finds none.
    pub fn register_signer(
        &mut self,
        domain: impl Into<DomainRef>,
        signer: Arc<dyn Signer>,
    ) -> Result<(), Error> {
        let id = self.directory.resolve(domain)?;
        self.connections.register_signer(id, signer)
    }

    /// Removes the domain's signer, promoting its provider into an empty
    /// provider slot. No-op when no signer is registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DomainNotFound`] for an unknown name, or
    /// [`Error::InvariantViolation`] when the stored signer has lost its
    /// provider reference.
    pub fn unregister_signer(&mut self, domain: impl Into<DomainRef>) -> Result<(), Error> {
        let id = self.directory.resolve(domain)?;
        self.connections.unregister_signer(id)
    }

    /// Removes every registered signer, preserving providers per domain.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::InvariantViolation`] encountered.
    pub fn clear_signers(&mut self) -> Result<(), Error> {
        self.connections.clear_signers()
    }

    /// The domain's provider, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DomainNotFound`] for an unknown name.
    pub fn get_provider(
        &self,
        domain: impl Into<DomainRef>,
    ) -> Result<Option<Arc<dyn Provider>>, Error> {
        let id = self.directory.resolve(domain)?;
        Ok(self.connections.provider(id))
    }

    /// The domain's provider, failing when absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DomainNotFound`] or [`Error::NotFound`] with kind
    /// `Provider`.
    pub fn must_get_provider(
        &self,
        domain: impl Into<DomainRef>,
    ) -> Result<Arc<dyn Provider>, Error> {
        let id = self.directory.resolve(domain)?;
        self.connections.must_provider(id)
    }

    /// The domain's signer, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DomainNotFound`] for an unknown name.
    pub fn get_signer(
        &self,
        domain: impl Into<DomainRef>,
    ) -> Result<Option<Arc<dyn Signer>>, Error> {
        let id = self.directory.resolve(domain)?;
        Ok(self.connections.signer(id))
    }

    /// The domain's signer, failing when absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DomainNotFound`] or [`Error::NotFound`] with kind
    /// `Signer`.
    pub fn must_get_signer(
        &self,
        domain: impl Into<DomainRef>,
    ) -> Result<Arc<dyn Signer>, Error> {
        let id = self.directory.resolve(domain)?;
        self.connections.must_signer(id)
    }

    /// The best available connection: signer preferred over provider.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DomainNotFound`] for an unknown name.
    pub fn get_connection(
        &self,
        domain: impl Into<DomainRef>,
    ) -> Result<Option<Connection>, Error> {
        let id = self.directory.resolve(domain)?;
        Ok(self.connections.connection(id))
    }

    /// The best available connection, failing when neither exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DomainNotFound`] or [`Error::ConnectionNotFound`].
    pub fn must_get_connection(
        &self,
        domain: impl Into<DomainRef>,
    ) -> Result<Connection, Error> {
        let id = self.directory.resolve(domain)?;
        self.connections.must_connection(id)
    }

    /// The signer's derived address, or `None` without a signer.
    ///
    /// Suspends only inside the external derivation call; failures propagate
    /// unchanged and nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DomainNotFound`] for an unknown name, or whatever
    /// the signer's derivation reports.
    pub async fn get_address(
        &self,
        domain: impl Into<DomainRef>,
    ) -> Result<Option<String>, Error> {
        let id = self.directory.resolve(domain)?;
        self.connections.address(id).await
    }

    // ── Policy ──────────────────────────────────────────────────────────

    /// Sets the domain's transaction-override bag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DomainNotFound`] for an unknown name.
    pub fn register_overrides(
        &mut self,
        domain: impl Into<DomainRef>,
        overrides: Overrides,
    ) -> Result<(), Error> {
        let id = self.directory.resolve(domain)?;
        self.policy.set_overrides(id, overrides);
        Ok(())
    }

    /// The domain's override bag; empty when never set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DomainNotFound`] for an unknown name.
    pub fn get_overrides(&self, domain: impl Into<DomainRef>) -> Result<Overrides, Error> {
        let id = self.directory.resolve(domain)?;
        Ok(self.policy.overrides(id))
    }

    /// Sets the domain's required confirmation count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DomainNotFound`] for an unknown name.
    pub fn register_confirmations(
        &mut self,
        domain: impl Into<DomainRef>,
        confirmations: u32,
    ) -> Result<(), Error> {
        let id = self.directory.resolve(domain)?;
        self.policy.set_confirmations(id, confirmations);
        Ok(())
    }

    /// The domain's required confirmation count; `0` when never set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DomainNotFound`] for an unknown name.
    pub fn get_confirmations(&self, domain: impl Into<DomainRef>) -> Result<u32, Error> {
        let id = self.directory.resolve(domain)?;
        Ok(self.policy.confirmations(id))
    }
}
