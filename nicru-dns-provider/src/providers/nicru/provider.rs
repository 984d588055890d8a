//! nic.ru DnsApi trait 实现

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::encode_segment;
use crate::traits::{DnsApi, ErrorContext, ProviderErrorMapper};
use crate::types::{RemoteRecord, TxtRecordRequest};
use crate::utils::log_sanitizer::mask;

use super::NicruClient;
use super::types::AddRecordsRequest;

#[async_trait]
impl DnsApi for NicruClient {
    async fn authenticate(&mut self) -> Result<()> {
        let token = self.request_token().await?;
        log::info!(
            "[{}] Authenticated as {} (token type {})",
            self.provider_name(),
            mask(&self.credentials.username),
            token.token_type
        );
        self.token = Some(token);
        Ok(())
    }

    async fn add_record(&self, record: &TxtRecordRequest) -> Result<()> {
        if record.name.trim().is_empty() {
            return Err(ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "name".to_string(),
                detail: "record name must not be empty".to_string(),
            });
        }

        let path = format!("{}/records", self.zone_path());
        let body = AddRecordsRequest::txt(record);
        self.put(&path, &body, self.zone_context()).await?;

        log::debug!(
            "[{}] Staged TXT {} in zone {}",
            self.provider_name(),
            record.name,
            self.zone()
        );
        Ok(())
    }

    async fn list_records(&self) -> Result<Vec<RemoteRecord>> {
        let path = format!("{}/records", self.zone_path());
        let response = self.get(&path, self.zone_context()).await?;
        let records = response.into_records();

        log::debug!(
            "[{}] Zone {} has {} records",
            self.provider_name(),
            self.zone(),
            records.len()
        );
        Ok(records)
    }

    async fn delete_record(&self, record_id: &str) -> Result<()> {
        let path = format!("{}/records/{}", self.zone_path(), encode_segment(record_id));
        let ctx = ErrorContext {
            record_id: Some(record_id.to_string()),
            zone: Some(self.zone().to_string()),
        };
        self.delete(&path, ctx).await?;
        Ok(())
    }

    async fn commit(&self) -> Result<()> {
        let path = format!("{}/commit", self.zone_path());
        self.post(&path, self.zone_context()).await?;

        log::debug!("[{}] Committed zone {}", self.provider_name(), self.zone());
        Ok(())
    }
}
