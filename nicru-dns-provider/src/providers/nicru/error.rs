//! nic.ru error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::NicruClient;

/// nic.ru error mapping
///
/// The OAuth endpoint reports RFC 6749 error codes; `dns-master` reports
/// numeric codes inside `<errors>`, which are only kept as raw context. The
/// HTTP status decides the category there.
impl ProviderErrorMapper for NicruClient {
    fn provider_name(&self) -> &'static str {
        "nicru"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match (raw.status, raw.code.as_deref()) {
            // OAuth: bad client id/secret or bad account login/password
            (_, Some("invalid_client" | "invalid_grant" | "unauthorized_client")) | (Some(401), _) => {
                ProviderError::InvalidCredentials {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }

            // OAuth: scope not granted to the application, or token scope too narrow
            (_, Some("invalid_scope")) | (Some(403), _) => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // Unknown record id when one was addressed, otherwise unknown service/zone
            (Some(404), _) => match context.record_id {
                Some(record_id) => ProviderError::RecordNotFound {
                    provider: self.provider_name().to_string(),
                    record_id,
                    raw_message: Some(raw.message),
                },
                None => ProviderError::ZoneNotFound {
                    provider: self.provider_name().to_string(),
                    zone: context.zone.unwrap_or_else(|| "<unknown>".to_string()),
                    raw_message: Some(raw.message),
                },
            },

            // Other error fallback
            _ => self.unknown_error(raw),
        }
    }
}
