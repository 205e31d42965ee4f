//! Stub connection handles shared by the crate's unit tests.

use std::sync::Arc;

use url::Url;

use super::handle::{Provider, Rebind, Signer};
use crate::error::Error;

/// In-memory provider stub; identity is checked via `Arc::ptr_eq`.
#[derive(Debug)]
pub struct StubProvider {
    pub label: &'static str,
    pub endpoint: Option<Url>,
}

impl StubProvider {
    pub fn arc(label: &'static str) -> Arc<dyn Provider> {
        Arc::new(Self {
            label,
            endpoint: None,
        })
    }
}

impl Provider for StubProvider {
    fn endpoint(&self) -> Option<&Url> {
        self.endpoint.as_ref()
    }
}

/// How a [`StubSigner`] responds to rebind requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RebindMode {
    Supported,
    Unsupported,
    Failing,
}

/// Configurable signer stub.
#[derive(Debug)]
pub struct StubSigner {
    address: String,
    provider: Option<Arc<dyn Provider>>,
    rebind: RebindMode,
    fail_address: bool,
}

impl StubSigner {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_owned(),
            provider: None,
            rebind: RebindMode::Supported,
            fail_address: false,
        }
    }

    pub fn rebindable(mut self) -> Self {
        self.rebind = RebindMode::Supported;
        self
    }

    pub fn unrebindable(mut self) -> Self {
        self.rebind = RebindMode::Unsupported;
        self
    }

    pub fn failing(mut self) -> Self {
        self.rebind = RebindMode::Failing;
        self
    }

    pub fn with_provider(mut self, provider: &Arc<dyn Provider>) -> Self {
        self.provider = Some(Arc::clone(provider));
        self
    }

    pub fn failing_address(mut self) -> Self {
        self.fail_address = true;
        self
    }

    pub fn arc(self) -> Arc<dyn Signer> {
        Arc::new(self)
    }
}

#[async_trait::async_trait]
impl Signer for StubSigner {
    fn rebind(&self, provider: &Arc<dyn Provider>) -> Rebind {
        match self.rebind {
            RebindMode::Supported => Rebind::Bound(Arc::new(Self {
                address: self.address.clone(),
                provider: Some(Arc::clone(provider)),
                rebind: self.rebind,
                fail_address: self.fail_address,
            })),
            RebindMode::Unsupported => Rebind::Unsupported,
            RebindMode::Failing => Rebind::Failed("stub signer refused the provider".to_owned()),
        }
    }

    fn provider(&self) -> Option<Arc<dyn Provider>> {
        self.provider.as_ref().map(Arc::clone)
    }

    async fn address(&self) -> Result<String, Error> {
        if self.fail_address {
            return Err(Error::Signer("stub derivation failure".to_owned()));
        }
        Ok(self.address.clone())
    }
}
