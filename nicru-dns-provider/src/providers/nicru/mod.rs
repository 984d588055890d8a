//! nic.ru `dns-master` API

mod error;
mod http;
mod provider;
mod types;

use std::time::Duration;

use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::providers::common::{
    DEFAULT_REQUEST_TIMEOUT_SECS, create_http_client, encode_segment, normalize_base_url,
};
use crate::traits::ProviderErrorMapper;
use crate::types::{AccessToken, Credentials};

/// Production API host.
pub const NICRU_API_BASE: &str = "https://api.nic.ru";
/// OAuth 2.0 token endpoint (password grant).
pub(crate) const OAUTH_TOKEN_PATH: &str = "/oauth/token";
/// Prefix of all DNS hosting endpoints.
pub(crate) const DNS_MASTER_PATH: &str = "/dns-master";

/// nic.ru DNS API client handle.
///
/// Scoped to the service and zone of its [`Credentials`]. The access token is
/// obtained by [`DnsApi::authenticate`](crate::DnsApi::authenticate) and
/// lives as long as the handle.
///
/// # Construction
///
/// ```rust,no_run
/// # use nicru_dns_provider::{Credentials, NicruClient};
/// # fn build(credentials: Credentials) {
/// let client = NicruClient::builder(credentials)
///     .request_timeout(std::time::Duration::from_secs(15))
///     .build();
/// # }
/// ```
pub struct NicruClient {
    pub(crate) client: Client,
    pub(crate) api_base: String,
    pub(crate) credentials: Credentials,
    pub(crate) token: Option<AccessToken>,
}

/// Builder for [`NicruClient`].
pub struct NicruClientBuilder {
    credentials: Credentials,
    api_base: String,
    request_timeout: Duration,
}

impl NicruClientBuilder {
    fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_base: NICRU_API_BASE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Override the API host (default: [`NICRU_API_BASE`]).
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = normalize_base_url(&api_base.into());
        self
    }

    /// Set the per-request timeout (default: 30 seconds).
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Build the [`NicruClient`] instance. No network call is made.
    pub fn build(self) -> NicruClient {
        NicruClient {
            client: create_http_client(self.request_timeout),
            api_base: self.api_base,
            credentials: self.credentials,
            token: None,
        }
    }
}

impl NicruClient {
    /// Creates a client for the production API with default settings.
    pub fn new(credentials: Credentials) -> Self {
        Self::builder(credentials).build()
    }

    /// Returns a builder for customizing the client configuration.
    pub fn builder(credentials: Credentials) -> NicruClientBuilder {
        NicruClientBuilder::new(credentials)
    }

    /// Default service of this handle.
    pub fn service(&self) -> &str {
        &self.credentials.service
    }

    /// Default zone of this handle.
    pub fn zone(&self) -> &str {
        &self.credentials.zone
    }

    /// Whether a non-expired access token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_ref().is_some_and(|t| !t.is_expired())
    }

    /// `/dns-master/services/{service}/zones/{zone}`
    pub(crate) fn zone_path(&self) -> String {
        format!(
            "{DNS_MASTER_PATH}/services/{}/zones/{}",
            encode_segment(self.service()),
            encode_segment(self.zone())
        )
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    /// Current bearer token, or `NotAuthenticated`.
    pub(crate) fn bearer_token(&self) -> Result<&str> {
        match &self.token {
            Some(token) if !token.is_expired() => Ok(&token.value),
            Some(_) => {
                log::warn!("[{}] Access token expired", self.provider_name());
                Err(self.not_authenticated())
            }
            None => Err(self.not_authenticated()),
        }
    }

    fn not_authenticated(&self) -> ProviderError {
        ProviderError::NotAuthenticated {
            provider: self.provider_name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(super) fn credentials() -> Credentials {
        Credentials {
            client_id: "app-id".to_string(),
            client_secret: "app-secret".to_string(),
            username: "123456/NIC-D".to_string(),
            password: "hunter2".to_string(),
            scope: "GET:/dns-master/.+".to_string(),
            service: "EXAMPLE-SVC".to_string(),
            zone: "example.com".to_string(),
        }
    }

    #[test]
    fn zone_path_is_encoded() {
        let mut creds = credentials();
        creds.service = "my svc".to_string();
        let client = NicruClient::new(creds);
        assert_eq!(
            client.zone_path(),
            "/dns-master/services/my%20svc/zones/example.com"
        );
    }

    #[test]
    fn builder_overrides_base() {
        let client = NicruClient::builder(credentials())
            .api_base("http://127.0.0.1:9000/")
            .build();
        assert_eq!(client.url("/oauth/token"), "http://127.0.0.1:9000/oauth/token");
    }

    #[test]
    fn bearer_requires_token() {
        let mut client = NicruClient::new(credentials());
        assert!(!client.is_authenticated());
        assert!(matches!(
            client.bearer_token(),
            Err(ProviderError::NotAuthenticated { .. })
        ));

        client.token = Some(AccessToken::new("abc".into(), "Bearer".into(), Some(60)));
        assert!(client.is_authenticated());
        assert_eq!(client.bearer_token().ok(), Some("abc"));

        client.token = Some(AccessToken::new("abc".into(), "Bearer".into(), Some(-5)));
        assert!(!client.is_authenticated());
        assert!(client.bearer_token().is_err());
    }
}
