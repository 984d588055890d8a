use serde::{Deserialize, Serialize};

/// Error returned by every nic.ru API call.
///
/// `provider` names the binding that failed (always `"nicru"` here); serde
/// tags the variant as `code` for structured reporting. Nothing in this crate
/// retries, so `RateLimited`, `Timeout` and `NetworkError` reach the caller
/// unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// Connection failure, or the gateway answered 502–504.
    NetworkError { provider: String, detail: String },

    /// The HTTP client timed out.
    Timeout { provider: String, detail: String },

    /// HTTP 429. `retry_after` comes from the `Retry-After` header.
    RateLimited {
        provider: String,
        retry_after: Option<u64>,
        raw_message: Option<String>,
    },

    /// OAuth rejected the application or account, or the API rejected the token.
    InvalidCredentials {
        provider: String,
        raw_message: Option<String>,
    },

    /// A record call was made before `authenticate`, or after the token expired.
    NotAuthenticated { provider: String },

    /// The token scope does not cover the request.
    PermissionDenied {
        provider: String,
        raw_message: Option<String>,
    },

    /// Unknown service/zone pair for this account.
    ZoneNotFound {
        provider: String,
        zone: String,
        raw_message: Option<String>,
    },

    /// Unknown record id.
    RecordNotFound {
        provider: String,
        record_id: String,
        raw_message: Option<String>,
    },

    /// Request rejected before it was sent.
    InvalidParameter {
        provider: String,
        param: String,
        detail: String,
    },

    /// Response body was neither the expected JSON nor XML.
    ParseError { provider: String, detail: String },

    /// Request body could not be encoded.
    SerializationError { provider: String, detail: String },

    /// `dns-master` error without a dedicated variant; `raw_code` is the
    /// `<error code="..">` attribute when present.
    Unknown {
        provider: String,
        raw_code: Option<String>,
        raw_message: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（凭证错误、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::NotAuthenticated { .. }
                | Self::PermissionDenied { .. }
                | Self::ZoneNotFound { .. }
                | Self::RecordNotFound { .. }
                | Self::InvalidParameter { .. }
        )
    }
}

/// `": msg"` when the API supplied a message.
fn suffix(raw_message: Option<&String>) -> String {
    raw_message.map(|m| format!(": {m}")).unwrap_or_default()
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::RateLimited {
                provider,
                retry_after: Some(secs),
                ..
            } => write!(f, "[{provider}] Rate limited (retry after {secs}s)"),
            Self::RateLimited { provider, .. } => write!(f, "[{provider}] Rate limited"),
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => write!(
                f,
                "[{provider}] Invalid credentials{}",
                suffix(raw_message.as_ref())
            ),
            Self::NotAuthenticated { provider } => {
                write!(f, "[{provider}] Not authenticated: no valid access token")
            }
            Self::PermissionDenied {
                provider,
                raw_message,
            } => write!(
                f,
                "[{provider}] Permission denied{}",
                suffix(raw_message.as_ref())
            ),
            Self::ZoneNotFound {
                provider,
                zone,
                raw_message,
            } => write!(
                f,
                "[{provider}] Zone '{zone}' not found{}",
                suffix(raw_message.as_ref())
            ),
            Self::RecordNotFound {
                provider,
                record_id,
                ..
            } => write!(f, "[{provider}] Record '{record_id}' not found"),
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => write!(f, "[{provider}] Invalid parameter '{param}': {detail}"),
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
            Self::Unknown {
                provider,
                raw_code: Some(code),
                raw_message,
            } => write!(f, "[{provider}] {raw_message} (code {code})"),
            Self::Unknown {
                provider,
                raw_message,
                ..
            } => write!(f, "[{provider}] {raw_message}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// `Result<T, ProviderError>`
pub type Result<T> = std::result::Result<T, ProviderError>;
