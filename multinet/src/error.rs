//! Unified error types for the registry.

use thiserror::Error;

use crate::domain::DomainId;

/// Entity kinds reported by `must_get_*` lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A registered domain.
    Domain,
    /// A read connection handle.
    Provider,
    /// A signing connection handle.
    Signer,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domain => f.write_str("Domain"),
            Self::Provider => f.write_str("Provider"),
            Self::Signer => f.write_str("Signer"),
        }
    }
}

/// Top-level error type for the registry.
///
/// Every failure is surfaced to the caller immediately; the registry never
/// retries and never absorbs an error (the one deliberate exception is
/// [`known_domain`](crate::Multinet::known_domain), a probe that converts
/// [`Error::DomainNotFound`] into a boolean).
#[derive(Debug, Error)]
pub enum Error {
    /// A domain name matched no registered domain.
    #[error("no registered domain named '{0}'")]
    DomainNotFound(String),

    /// A `must_get_*` lookup found nothing for a resolved domain id.
    #[error("{kind} not found for domain {domain}")]
    NotFound {
        /// Kind of entity that was looked up.
        kind: EntityKind,
        /// Domain id the lookup was keyed by.
        domain: DomainId,
    },

    /// Signer registration attempted with neither a registered provider nor
    /// a signer-carried provider.
    #[error("cannot register signer for domain {0}: no provider available")]
    MissingProvider(DomainId),

    /// Signer registration fell through the rebind path and the signer
    /// carries no provider of its own.
    #[error("signer for domain {0} carries no provider and cannot be rebound")]
    SignerHasNoProvider(DomainId),

    /// Neither a signer nor a provider is registered for the domain.
    #[error("no connection registered for domain {0}")]
    ConnectionNotFound(DomainId),

    /// A stored signer lost its provider reference. This indicates a bug in
    /// the registry's consistency maintenance, not a caller error, and is
    /// non-recoverable.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// External signer operation (e.g. address derivation) failed.
    #[error("signer: {0}")]
    Signer(String),

    /// Configuration file could not be resolved, read, or parsed.
    #[error("config: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand for [`Error::NotFound`].
    #[must_use]
    pub const fn not_found(kind: EntityKind, domain: DomainId) -> Self {
        Self::NotFound { kind, domain }
    }
}
