use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{RemoteRecord, TxtRecordRequest};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（nic.ru XML `code` 属性或 OAuth `error` 字段）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
    /// HTTP 状态码
    pub status: Option<u16>,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            status: None,
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
            status: None,
        }
    }

    #[must_use]
    pub fn status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 记录 ID（用于 `RecordNotFound`）
    pub record_id: Option<String>,
    /// 区域名称（用于 `ZoneNotFound`）
    pub zone: Option<String>,
}

/// Provider 错误映射 Trait（内部使用）
/// 将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// DNS API client handle.
///
/// A handle is scoped to one account and one default service/zone. Record
/// calls require a prior successful [`authenticate`](Self::authenticate).
///
/// Mutations are two-phase: [`add_record`](Self::add_record) and
/// [`delete_record`](Self::delete_record) only stage changes, which take
/// effect after [`commit`](Self::commit).
#[async_trait]
pub trait DnsApi: Send + Sync {
    /// Acquire an access token and keep it in this handle.
    async fn authenticate(&mut self) -> Result<()>;

    /// Stage a TXT record in the default zone.
    async fn add_record(&self, record: &TxtRecordRequest) -> Result<()>;

    /// List every record of the default zone.
    async fn list_records(&self) -> Result<Vec<RemoteRecord>>;

    /// Stage deletion of a record by id.
    async fn delete_record(&self, record_id: &str) -> Result<()>;

    /// Apply staged changes of the default zone.
    async fn commit(&self) -> Result<()>;
}
