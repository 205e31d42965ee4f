//! Configuration loading, default template generation, and registry
//! construction from configuration.
//!
//! # Configuration file format
//!
//! ```toml
//! [domains.sepolia]
//! id = 11155111
//! rpc = "https://rpc.sepolia.org"
//! confirmations = 2
//!
//! [domains.sepolia.overrides]
//! gas_limit = 3_000_000
//! ```
//!
//! Provider construction is delegated to a caller-supplied
//! [`ProviderFactory`]; this module only wires resolved configuration into a
//! [`Multinet`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::Multinet;
use crate::conn::ProviderFactory;
use crate::domain::{Domain, DomainId};
use crate::error::Error;
use crate::policy::Overrides;

/// Configuration for one domain (matches the TOML structure).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEntry {
    /// Canonical numeric domain id.
    pub id: DomainId,
    /// Optional RPC URL; when present a provider is built and registered.
    #[serde(default)]
    pub rpc: Option<String>,
    /// Required confirmation count (default: 0).
    #[serde(default)]
    pub confirmations: u32,
    /// Transaction-override bag (default: empty).
    #[serde(default)]
    pub overrides: Overrides,
}

/// Top-level configuration: domains keyed by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainsConfig {
    /// Domain entries keyed by human-friendly name.
    #[serde(default)]
    pub domains: BTreeMap<String, DomainEntry>,
}

/// Load configuration from a TOML file at the given path.
///
/// # Errors
///
/// Returns [`Error::Config`] if the file cannot be resolved, read, or
/// parsed.
pub fn load_config(path: &Path) -> Result<DomainsConfig, Error> {
    let config_path = path.canonicalize().map_err(|e| {
        Error::Config(format!(
            "failed to resolve config path '{}': {e}",
            path.display()
        ))
    })?;
    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        Error::Config(format!(
            "failed to read config file '{}': {e}",
            config_path.display()
        ))
    })?;
    toml::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "failed to parse TOML config '{}': {e}",
            config_path.display()
        ))
    })
}

/// Generate a default TOML configuration template.
#[must_use]
pub fn generate_default_config() -> String {
    String::from(
        r#"# Multinet domain configuration
#
# Each [domains.<name>] entry registers one network. The id is the canonical
# identifier used by every registry operation; the name is a human-friendly
# alias resolved case-insensitively.

[domains.sepolia]
id = 11155111
rpc = "https://rpc.sepolia.org"
confirmations = 2

[domains.local]
id = 31337
rpc = "http://127.0.0.1:8545"

# Optional per-domain transaction overrides.
# [domains.sepolia.overrides]
# gas_limit = 3000000
"#,
    )
}

/// Build a [`Multinet`] from configuration.
///
/// Registers every domain with its policy, then builds and registers a
/// provider (via `factory`) for each entry that names an RPC URL. Entries
/// are processed in name order.
///
/// # Errors
///
/// Returns [`Error::Config`] for an unparsable RPC URL, or whatever the
/// factory reports when provider construction fails.
pub fn build_registry(
    config: &DomainsConfig,
    factory: &dyn ProviderFactory,
) -> Result<Multinet, Error> {
    let mut net = Multinet::new();
    for (name, entry) in &config.domains {
        net.register_domain(Domain {
            id: entry.id,
            name: name.clone(),
        });
        net.register_confirmations(entry.id, entry.confirmations)?;
        net.register_overrides(entry.id, entry.overrides.clone())?;
        if let Some(rpc) = &entry.rpc {
            let url = Url::parse(rpc).map_err(|e| {
                Error::Config(format!("invalid rpc url '{rpc}' for domain '{name}': {e}"))
            })?;
            let provider = factory.from_url(&url)?;
            net.register_provider(entry.id, provider)?;
        }
    }
    Ok(net)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::conn::Provider;
    use crate::conn::testing::StubProvider;

    #[derive(Debug)]
    struct UrlFactory;

    impl ProviderFactory for UrlFactory {
        fn from_url(&self, url: &Url) -> Result<Arc<dyn Provider>, Error> {
            Ok(Arc::new(StubProvider {
                label: "configured",
                endpoint: Some(url.clone()),
            }))
        }
    }

    const SAMPLE: &str = r#"
        [domains.sepolia]
        id = 11155111
        rpc = "https://rpc.sepolia.org"
        confirmations = 2

        [domains.sepolia.overrides]
        gas_limit = 3000000

        [domains.offline]
        id = 42
    "#;

    #[test]
    fn sample_config_parses() {
        let config: DomainsConfig = toml::from_str(SAMPLE).unwrap();
        let sepolia = &config.domains["sepolia"];
        assert_eq!(sepolia.id, 11_155_111);
        assert_eq!(sepolia.confirmations, 2);
        assert_eq!(
            sepolia.overrides["gas_limit"],
            serde_json::json!(3_000_000)
        );
        let offline = &config.domains["offline"];
        assert_eq!(offline.rpc, None);
        assert_eq!(offline.confirmations, 0);
        assert!(offline.overrides.is_empty());
    }

    #[test]
    fn default_template_parses() {
        let config: DomainsConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.domains["sepolia"].id, 11_155_111);
        assert_eq!(config.domains["local"].id, 31337);
    }

    #[test]
    fn build_registry_wires_domains_policy_and_providers() {
        let config: DomainsConfig = toml::from_str(SAMPLE).unwrap();
        let net = build_registry(&config, &UrlFactory).unwrap();

        assert_eq!(net.resolve_domain("Sepolia").unwrap(), 11_155_111);
        assert_eq!(net.get_confirmations(11_155_111).unwrap(), 2);
        let provider = net.get_provider("sepolia").unwrap().unwrap();
        assert_eq!(
            provider.endpoint().map(Url::as_str),
            Some("https://rpc.sepolia.org/")
        );

        // Entries without an rpc url register no provider.
        assert!(net.known_domain("offline"));
        assert!(net.get_provider("offline").unwrap().is_none());
    }

    #[test]
    fn bad_rpc_url_is_a_config_error() {
        let config: DomainsConfig = toml::from_str(
            r#"
            [domains.broken]
            id = 1
            rpc = "not a url"
        "#,
        )
        .unwrap();
        let err = build_registry(&config, &UrlFactory).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
