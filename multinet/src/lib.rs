//! Multi-network connection registry.
//!
//! Tracks multiple independent blockchain networks ("domains") and, for
//! each, at most one read connection ([`Provider`]), at most one signing
//! connection ([`Signer`]), and per-domain transaction policy (override bag
//! and confirmation count). Callers reference a domain by name or canonical
//! numeric id; all storage is keyed by the resolved id.
//!
//! The crate performs no network I/O itself: providers and signers are
//! opaque handles supplied by the surrounding application, constructed
//! through a [`ProviderFactory`] when loading from configuration.
//!
//! ```
//! use std::sync::Arc;
//! use multinet::{Domain, Multinet};
//!
//! let mut net = Multinet::new();
//! net.register_domain(Domain { id: 1, name: "alpha".to_owned() });
//! assert_eq!(net.resolve_domain("Alpha").unwrap(), 1);
//! assert!(net.get_connection(1).unwrap().is_none());
//! ```

pub mod config;
pub mod conn;
pub mod domain;
pub mod error;
mod multinet;
pub mod policy;

pub use self::conn::{Connection, ConnectionRegistry, Provider, ProviderFactory, Rebind, Signer};
pub use self::domain::{Domain, DomainDirectory, DomainId, DomainRef};
pub use self::error::{EntityKind, Error};
pub use self::multinet::Multinet;
pub use self::policy::{Overrides, PolicyStore};
