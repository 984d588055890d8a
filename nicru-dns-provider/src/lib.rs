//! # nicru-dns-provider
//!
//! A minimal binding for the [nic.ru](https://www.nic.ru/) `dns-master` API,
//! covering what a DNS-01 challenge needs: obtain an OAuth token, stage a TXT
//! record, list a zone, stage a deletion and commit.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for static and cross-compiled builds.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nicru_dns_provider::{Credentials, DnsApi, NicruClient, TxtRecordRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials {
//!         client_id: "app-id".to_string(),
//!         client_secret: "app-secret".to_string(),
//!         username: "123456/NIC-D".to_string(),
//!         password: "password".to_string(),
//!         scope: "GET:/dns-master/.+".to_string(),
//!         service: "MY-SERVICE".to_string(),
//!         zone: "example.com".to_string(),
//!     };
//!
//!     let mut client = NicruClient::new(credentials);
//!     client.authenticate().await?;
//!
//!     client
//!         .add_record(&TxtRecordRequest {
//!             name: "_acme-challenge".to_string(),
//!             value: "token".to_string(),
//!             ttl: 60,
//!         })
//!         .await?;
//!     client.commit().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError):
//!
//! - [`ProviderError::InvalidCredentials`] — the token request was rejected
//! - [`ProviderError::NotAuthenticated`] — record call without a token
//! - [`ProviderError::ZoneNotFound`] — unknown service/zone pair
//! - [`ProviderError::RateLimited`] — API rate limit exceeded
//!
//! Requests are never retried.

mod error;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export core trait only (internal traits are not exported)
pub use traits::DnsApi;

// Re-export types
pub use types::{
    AccessToken, CREDENTIAL_FIELDS, CredentialField, CredentialValidationError, Credentials,
    RemoteRecord, TxtRecordRequest,
};

// Re-export the concrete client
pub use providers::{NICRU_API_BASE, NicruClient, NicruClientBuilder};
