//! Per-domain transaction policy: override parameters and confirmations.

use std::collections::HashMap;

use crate::domain::DomainId;

/// Opaque bag of transaction-parameter defaults applied per domain.
pub type Overrides = serde_json::Map<String, serde_json::Value>;

/// Id-keyed store of transaction policy.
///
/// Entries are lazily created and each field has a defined default when
/// absent: an empty [`Overrides`] bag and `0` confirmations. Lookups work on
/// raw ids, including ids never registered in the domain directory.
#[derive(Debug, Clone, Default)]
pub struct PolicyStore {
    overrides: HashMap<DomainId, Overrides>,
    confirmations: HashMap<DomainId, u32>,
}

impl PolicyStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the override bag for a domain, replacing any previous one.
    pub fn set_overrides(&mut self, domain: DomainId, overrides: Overrides) {
        self.overrides.insert(domain, overrides);
    }

    /// The domain's override bag; empty when never set.
    #[must_use]
    pub fn overrides(&self, domain: DomainId) -> Overrides {
        self.overrides.get(&domain).cloned().unwrap_or_default()
    }

    /// Sets the required confirmation count for a domain.
    pub fn set_confirmations(&mut self, domain: DomainId, confirmations: u32) {
        self.confirmations.insert(domain, confirmations);
    }

    /// The domain's required confirmation count; `0` when never set.
    #[must_use]
    pub fn confirmations(&self, domain: DomainId) -> u32 {
        self.confirmations.get(&domain).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_unknown_domains() {
        let store = PolicyStore::new();
        assert!(store.overrides(42).is_empty());
        assert_eq!(store.confirmations(42), 0);
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut store = PolicyStore::new();
        let mut bag = Overrides::new();
        bag.insert("gas_limit".to_owned(), serde_json::json!(3_000_000));
        store.set_overrides(5, bag.clone());
        store.set_confirmations(5, 12);

        assert_eq!(store.overrides(5), bag);
        assert_eq!(store.confirmations(5), 12);
        // Other domains stay at defaults.
        assert!(store.overrides(6).is_empty());
        assert_eq!(store.confirmations(6), 0);
    }
}
