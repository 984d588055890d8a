//! nic.ru DNS-01 authenticator

use async_trait::async_trait;
use nicru_dns_provider::{Credentials, DnsApi, ProviderError, TxtRecordRequest};

use crate::error::{PluginError, PluginResult};
use crate::traits::{Authenticator, ClientFactory, NicruClientFactory};

/// TTL of the challenge record (seconds).
pub const TTL: u32 = 60;

/// Default time the host waits for DNS propagation (seconds).
pub const DEFAULT_PROPAGATION_SECONDS: u64 = 180;

/// Label of the DNS-01 challenge record.
pub const CHALLENGE_LABEL: &str = "_acme-challenge";

pub const DESCRIPTION: &str =
    "Obtain certificates using a DNS TXT record (if you are using nic.ru for DNS).";

pub const MORE_INFO: &str = "This plugin configures a DNS TXT record to respond to \
                             a dns-01 challenge using the nic.ru Remote REST API.";

/// Record name relative to `zone`.
///
/// Removes the first occurrence of `zone` anywhere in `validation_name`, then
/// trims `.` from both ends. Without an occurrence only the dots are trimmed.
///
/// ```
/// use certbot_dns_nicru::derive_record_name;
///
/// assert_eq!(
///     derive_record_name("_acme-challenge.example.com.", "example.com"),
///     "_acme-challenge"
/// );
/// ```
pub fn derive_record_name(validation_name: &str, zone: &str) -> String {
    validation_name
        .replacen(zone, "", 1)
        .trim_matches('.')
        .to_string()
}

/// Default validation name for `domain` (`*.` wildcard label dropped).
pub fn validation_name_for(domain: &str) -> String {
    let base = domain.strip_prefix("*.").unwrap_or(domain);
    format!("{CHALLENGE_LABEL}.{base}")
}

/// DNS-01 authenticator backed by the nic.ru `dns-master` API.
///
/// Every [`perform`](Authenticator::perform) and
/// [`cleanup`](Authenticator::cleanup) creates its own client handle and
/// authenticates it; nothing but the credentials is kept between calls.
pub struct NicruAuthenticator<F = NicruClientFactory> {
    credentials: Credentials,
    factory: F,
}

impl NicruAuthenticator {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_factory(credentials, NicruClientFactory::new())
    }
}

impl<F: ClientFactory> NicruAuthenticator<F> {
    pub fn with_factory(credentials: Credentials, factory: F) -> Self {
        Self {
            credentials,
            factory,
        }
    }

    /// Challenge record name for `validation_name` in the configured zone.
    pub fn record_name(&self, validation_name: &str) -> String {
        let zone = &self.credentials.zone;
        if !validation_name.contains(zone.as_str()) {
            log::warn!(
                "Zone '{zone}' does not occur in validation name '{validation_name}'; \
                 using it unchanged as the record name"
            );
        }
        derive_record_name(validation_name, zone)
    }

    /// Fresh client handle with a newly acquired token.
    async fn client(&self) -> PluginResult<Box<dyn DnsApi>> {
        let mut client = self.factory.create(&self.credentials);
        client.authenticate().await.map_err(PluginError::Auth)?;
        Ok(client)
    }
}

#[async_trait]
impl<F: ClientFactory> Authenticator for NicruAuthenticator<F> {
    async fn perform(
        &self,
        domain: &str,
        validation_name: &str,
        validation: &str,
    ) -> PluginResult<()> {
        let client = self.client().await?;
        let name = self.record_name(validation_name);

        log::info!("Adding TXT record {name} for {validation_name} (domain {domain})");

        let request = TxtRecordRequest {
            name,
            value: validation.to_string(),
            ttl: TTL,
        };

        let staged = async {
            client.add_record(&request).await?;
            client.commit().await
        };
        staged.await.map_err(PluginError::AddRecord)
    }

    async fn cleanup(
        &self,
        domain: &str,
        validation_name: &str,
        _validation: &str,
    ) -> PluginResult<()> {
        let client = self.client().await?;
        let name = self.record_name(validation_name);

        let removed = async {
            let records = client.list_records().await?;
            let mut removed = 0usize;
            for record in records.iter().filter(|r| r.name == name) {
                log::info!(
                    "Deleting TXT record {} (id {}) for domain {domain}",
                    record.name,
                    record.id
                );
                client.delete_record(&record.id).await?;
                client.commit().await?;
                removed += 1;
            }
            Ok::<_, ProviderError>(removed)
        }
        .await
        .map_err(PluginError::DeleteRecord)?;

        if removed == 0 {
            log::info!("No TXT record named {name} found, nothing to clean up");
        }
        Ok(())
    }
}
