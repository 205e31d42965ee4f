//! Capability contracts for external connection handles.
//!
//! The registry never talks to a network itself; it stores opaque handles
//! supplied by the surrounding application and only cares about two
//! capabilities: whether a signer can be rebound to a different provider, and
//! whether it carries a provider of its own.

use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::error::Error;

/// A read-capable connection handle for one network.
///
/// Opaque to the registry. Implementations typically wrap an RPC client; the
/// registry itself performs no I/O through them.
pub trait Provider: fmt::Debug + Send + Sync {
    /// RPC endpoint this provider reads from, when known.
    fn endpoint(&self) -> Option<&Url> {
        None
    }
}

/// Constructs [`Provider`] handles from RPC URLs.
///
/// The registry delegates all provider construction to this seam; it is
/// supplied by the surrounding application (see
/// [`build_registry`](crate::config::build_registry)).
pub trait ProviderFactory: fmt::Debug {
    /// Builds a provider for the given RPC URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL cannot be turned into a usable handle.
    fn from_url(&self, url: &Url) -> Result<Arc<dyn Provider>, Error>;
}

/// Outcome of asking a signer to bind to a different provider.
///
/// An explicit tri-state rather than a thrown-and-caught failure, so callers
/// can distinguish "this signer cannot be rebound at all" from "rebinding was
/// attempted and produced an unusable handle".
#[derive(Debug)]
pub enum Rebind {
    /// A new signer handle bound to the requested provider.
    Bound(Arc<dyn Signer>),
    /// The signer's capability set does not support rebinding.
    Unsupported,
    /// Rebinding was attempted but the result is unusable.
    Failed(String),
}

/// A write-capable (transaction-signing) connection handle for one network.
///
/// A signer is expected to be attachable to a provider; the registry's
/// consistency rules guarantee that a stored signer always has a discoverable
/// provider, either in the registry's provider slot or carried by the signer
/// itself.
#[async_trait::async_trait]
pub trait Signer: fmt::Debug + Send + Sync {
    /// Attempts to produce a copy of this signer bound to `provider`.
    fn rebind(&self, provider: &Arc<dyn Provider>) -> Rebind;

    /// The provider this signer currently carries, if any.
    fn provider(&self) -> Option<Arc<dyn Provider>>;

    /// Derives the signer's on-chain address.
    ///
    /// Suspends only inside the external derivation call; the registry adds
    /// no timeout, cancellation, or retry semantics on top.
    ///
    /// # Errors
    ///
    /// Surfaces whatever the underlying implementation reports, unchanged.
    async fn address(&self) -> Result<String, Error>;
}

/// The best available connection for a domain.
///
/// A signer can do everything a provider can (read) plus sign, so it takes
/// precedence whenever both are registered.
#[derive(Debug, Clone)]
pub enum Connection {
    /// A signing connection (also readable).
    Signer(Arc<dyn Signer>),
    /// A read-only connection.
    Provider(Arc<dyn Provider>),
}

impl Connection {
    /// Returns the signer, if this connection is one.
    #[must_use]
    pub fn as_signer(&self) -> Option<&Arc<dyn Signer>> {
        match self {
            Self::Signer(signer) => Some(signer),
            Self::Provider(_) => None,
        }
    }

    /// Returns the provider, if this connection is one.
    #[must_use]
    pub fn as_provider(&self) -> Option<&Arc<dyn Provider>> {
        match self {
            Self::Provider(provider) => Some(provider),
            Self::Signer(_) => None,
        }
    }
}
