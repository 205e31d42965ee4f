//! Connection handles and the per-domain connection registry.
//!
//! - [`handle`] — [`Provider`] / [`Signer`] capability traits, the [`Rebind`]
//!   tri-state, and the [`ProviderFactory`] construction seam.
//! - [`registry`] — [`ConnectionRegistry`], the id-keyed store that keeps
//!   providers and signers consistent with each other.

mod handle;
mod registry;

pub use self::handle::*;
pub use self::registry::*;

#[cfg(test)]
pub(crate) mod testing;
