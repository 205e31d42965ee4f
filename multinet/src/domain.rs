//! Domain identity and the directory of registered domains.
//!
//! A *domain* is one independent blockchain network, identified by a stable
//! numeric id and a human-friendly name. The [`DomainDirectory`] is the single
//! source of truth for turning any [`DomainRef`] (name or id) into the
//! canonical [`DomainId`] that keys every other subsystem.

use serde::{Deserialize, Serialize};

use crate::error::{EntityKind, Error};

/// Canonical numeric identifier of a domain.
pub type DomainId = u32;

/// A registered network: stable numeric id plus human-friendly alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// Canonical, stable identifier.
    pub id: DomainId,
    /// Human-friendly alias. Not guaranteed unique across domains.
    pub name: String,
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// A caller-supplied domain reference: either the canonical id or a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainRef {
    /// Canonical numeric id. Passes through resolution unchecked.
    Id(DomainId),
    /// Human-friendly name, matched case-insensitively.
    Name(String),
}

impl From<DomainId> for DomainRef {
    fn from(id: DomainId) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for DomainRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for DomainRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&Domain> for DomainRef {
    fn from(domain: &Domain) -> Self {
        Self::Id(domain.id)
    }
}

/// Directory of registered domains, preserving registration order.
///
/// Name lookups scan in registration-iteration order, so when two domains
/// share a name the earliest registration wins. The directory performs no
/// uniqueness validation; [`resolve`](Self::resolve) logs the ambiguity and
/// returns the first match.
#[derive(Debug, Clone, Default)]
pub struct DomainDirectory {
    // Registration order matters for name resolution; domain counts are
    // small enough that linear scans beat a second index.
    domains: Vec<Domain>,
}

impl DomainDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            domains: Vec::new(),
        }
    }

    /// Inserts or overwrites the entry keyed by `domain.id`.
    ///
    /// Overwriting an id with a new name silently replaces the old mapping;
    /// the entry keeps its original position in registration order. Duplicate
    /// names across distinct ids are not rejected.
    pub fn register(&mut self, domain: Domain) {
        tracing::debug!(id = domain.id, name = %domain.name, "registering domain");
        if let Some(existing) = self.domains.iter_mut().find(|d| d.id == domain.id) {
            *existing = domain;
        } else {
            self.domains.push(domain);
        }
    }

    /// Resolves a name-or-id reference to the canonical domain id.
    ///
    /// Ids pass through unchanged with no existence check. Names are matched
    /// case-insensitively against registered domains; the first match in
    /// registration order wins. A name matching more than one domain is a
    /// caller-visible ambiguity and is logged at `warn` level.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DomainNotFound`] when a name matches no registered
    /// domain.
    pub fn resolve(&self, domain: impl Into<DomainRef>) -> Result<DomainId, Error> {
        match domain.into() {
            DomainRef::Id(id) => Ok(id),
            DomainRef::Name(name) => {
                let mut matches = self
                    .domains
                    .iter()
                    .filter(|d| d.name.eq_ignore_ascii_case(&name));
                let first = matches
                    .next()
                    .ok_or_else(|| Error::DomainNotFound(name.clone()))?;
                if matches.next().is_some() {
                    tracing::warn!(
                        name = %name,
                        resolved = first.id,
                        "domain name is ambiguous; resolving to earliest registration"
                    );
                }
                Ok(first.id)
            }
        }
    }

    /// Returns whether [`resolve`](Self::resolve) would succeed. Never fails.
    #[must_use]
    pub fn known(&self, domain: impl Into<DomainRef>) -> bool {
        self.resolve(domain).is_ok()
    }

    /// Looks up the registered domain for a reference, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DomainNotFound`] when a name reference fails to
    /// resolve.
    pub fn get(&self, domain: impl Into<DomainRef>) -> Result<Option<&Domain>, Error> {
        let id = self.resolve(domain)?;
        Ok(self.domains.iter().find(|d| d.id == id))
    }

    /// Looks up the registered domain for a reference, failing when absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DomainNotFound`] for an unresolvable name, or
    /// [`Error::NotFound`] with kind `Domain` when the resolved id was never
    /// registered.
    pub fn must_get(&self, domain: impl Into<DomainRef>) -> Result<&Domain, Error> {
        let id = self.resolve(domain)?;
        self.domains
            .iter()
            .find(|d| d.id == id)
            .ok_or(Error::not_found(EntityKind::Domain, id))
    }

    /// All registered domain ids, in registration order.
    #[must_use]
    pub fn ids(&self) -> Vec<DomainId> {
        self.domains.iter().map(|d| d.id).collect()
    }

    /// All registered domain names, in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.domains.iter().map(|d| d.name.as_str()).collect()
    }

    /// All registered domain ids except the one referenced by `exclude`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DomainNotFound`] when `exclude` is an unresolvable
    /// name.
    pub fn remote_ids(&self, exclude: impl Into<DomainRef>) -> Result<Vec<DomainId>, Error> {
        let excluded = self.resolve(exclude)?;
        Ok(self
            .domains
            .iter()
            .map(|d| d.id)
            .filter(|id| *id != excluded)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> DomainDirectory {
        let mut dir = DomainDirectory::new();
        dir.register(Domain {
            id: 1,
            name: "alpha".to_owned(),
        });
        dir.register(Domain {
            id: 2,
            name: "beta".to_owned(),
        });
        dir
    }

    #[test]
    fn resolve_by_name_is_case_insensitive() {
        let dir = directory();
        assert_eq!(dir.resolve("alpha").unwrap(), 1);
        assert_eq!(dir.resolve("ALPHA").unwrap(), 1);
        assert_eq!(dir.resolve("Beta").unwrap(), 2);
    }

    #[test]
    fn resolve_by_id_passes_through_unchecked() {
        let dir = directory();
        assert_eq!(dir.resolve(2).unwrap(), 2);
        // Never-registered ids resolve to themselves.
        assert_eq!(dir.resolve(999).unwrap(), 999);
    }

    #[test]
    fn unknown_name_fails() {
        let dir = directory();
        let err = dir.resolve("gamma").unwrap_err();
        assert!(matches!(err, Error::DomainNotFound(name) if name == "gamma"));
    }

    #[test]
    fn known_probes_without_failing() {
        let dir = directory();
        assert!(dir.known("alpha"));
        assert!(!dir.known("gamma"));
        assert!(dir.known(999));
    }

    #[test]
    fn reregistering_an_id_replaces_the_name_in_place() {
        let mut dir = directory();
        dir.register(Domain {
            id: 1,
            name: "renamed".to_owned(),
        });
        assert_eq!(dir.resolve("renamed").unwrap(), 1);
        assert!(matches!(
            dir.resolve("alpha"),
            Err(Error::DomainNotFound(_))
        ));
        // Position in registration order is preserved.
        assert_eq!(dir.ids(), vec![1, 2]);
    }

    #[test]
    fn duplicate_names_resolve_to_earliest_registration() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let mut dir = directory();
        dir.register(Domain {
            id: 3,
            name: "Alpha".to_owned(),
        });
        assert_eq!(dir.resolve("alpha").unwrap(), 1);
    }

    #[test]
    fn must_get_reports_unregistered_ids() {
        let dir = directory();
        assert_eq!(dir.must_get(1).unwrap().name, "alpha");
        let err = dir.must_get(999).unwrap_err();
        assert!(matches!(
            err,
            Error::NotFound {
                kind: EntityKind::Domain,
                domain: 999,
            }
        ));
    }

    #[test]
    fn derived_views() {
        let dir = directory();
        assert_eq!(dir.ids(), vec![1, 2]);
        assert_eq!(dir.names(), vec!["alpha", "beta"]);
        assert_eq!(dir.remote_ids(1).unwrap(), vec![2]);
        assert_eq!(dir.remote_ids("beta").unwrap(), vec![1]);
    }
}
