//! # certbot-dns-nicru
//!
//! DNS-01 challenge authenticator for certbot, backed by the
//! [nic.ru](https://www.nic.ru/) `dns-master` API.
//!
//! [`NicruAuthenticator::perform`](Authenticator::perform) stages a TXT record
//! named after the validation name (relative to the configured zone) and
//! commits it; [`cleanup`](Authenticator::cleanup) deletes every record with
//! that name, committing after each deletion. Waiting for propagation is left
//! to the host.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use certbot_dns_nicru::{Authenticator, CredentialLoader, NicruAuthenticator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = CredentialLoader::load(Some(Path::new("/etc/letsencrypt/nicru.ini")))?;
//!     let authenticator = NicruAuthenticator::new(credentials);
//!
//!     authenticator
//!         .perform("example.com", "_acme-challenge.example.com", "token")
//!         .await?;
//!     // ... wait for propagation, let the CA validate ...
//!     authenticator
//!         .cleanup("example.com", "_acme-challenge.example.com", "token")
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod authenticator;
pub mod credentials;
pub mod error;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_utils;

pub use authenticator::{
    CHALLENGE_LABEL, DEFAULT_PROPAGATION_SECONDS, DESCRIPTION, MORE_INFO, NicruAuthenticator, TTL,
    derive_record_name, validation_name_for,
};
pub use credentials::CredentialLoader;
pub use error::{FailureKind, PluginError, PluginResult};
pub use traits::{Authenticator, ClientFactory, NicruClientFactory};
