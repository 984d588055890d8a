//! Host-facing and client-creation traits

use async_trait::async_trait;
use nicru_dns_provider::{Credentials, DnsApi, NICRU_API_BASE, NicruClient};

use crate::error::PluginResult;

/// DNS-01 authenticator interface driven by the host.
///
/// The host decides when to call [`perform`](Self::perform) and
/// [`cleanup`](Self::cleanup) and waits for propagation in between.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Publish `validation` under `validation_name`.
    async fn perform(
        &self,
        domain: &str,
        validation_name: &str,
        validation: &str,
    ) -> PluginResult<()>;

    /// Remove every record published for `validation_name`.
    async fn cleanup(
        &self,
        domain: &str,
        validation_name: &str,
        validation: &str,
    ) -> PluginResult<()>;
}

/// Creates a fresh, unauthenticated client handle for one invocation.
pub trait ClientFactory: Send + Sync {
    fn create(&self, credentials: &Credentials) -> Box<dyn DnsApi>;
}

/// Factory producing [`NicruClient`] handles.
#[derive(Debug, Clone)]
pub struct NicruClientFactory {
    api_base: String,
}

impl NicruClientFactory {
    pub fn new() -> Self {
        Self {
            api_base: NICRU_API_BASE.to_string(),
        }
    }

    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

impl Default for NicruClientFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientFactory for NicruClientFactory {
    fn create(&self, credentials: &Credentials) -> Box<dyn DnsApi> {
        Box::new(
            NicruClient::builder(credentials.clone())
                .api_base(self.api_base.as_str())
                .build(),
        )
    }
}
