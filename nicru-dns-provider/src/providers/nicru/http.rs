//! nic.ru HTTP 请求方法

use reqwest::RequestBuilder;
use serde::Serialize;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::types::AccessToken;
use crate::utils::log_sanitizer::{mask, truncate_for_log};

use super::types::{NicruResponse, OAuthErrorResponse, TokenResponse};
use super::{NicruClient, OAUTH_TOKEN_PATH};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>"#;

impl NicruClient {
    // ==================== 辅助方法 ====================

    /// 区域级错误上下文
    pub(crate) fn zone_context(&self) -> ErrorContext {
        ErrorContext {
            record_id: None,
            zone: Some(self.zone().to_string()),
        }
    }

    /// 统一处理 `dns-master` 响应
    ///
    /// 成功条件：HTTP 2xx 且 `<status>success</status>`。
    fn handle_response(
        &self,
        status: u16,
        response_text: &str,
        ctx: ErrorContext,
    ) -> Result<NicruResponse> {
        if (200..300).contains(&status) {
            let response: NicruResponse =
                HttpUtils::parse_xml(response_text, self.provider_name())?;
            if response.is_success() {
                return Ok(response);
            }
            let raw = response.first_error().unwrap_or_else(|| {
                RawApiError::new(format!("Request failed with status '{}'", response.status))
            });
            return Err(self.map_error(raw.status(status), ctx));
        }

        // 尝试解析结构化错误
        let raw = quick_xml::de::from_str::<NicruResponse>(response_text)
            .ok()
            .and_then(|r| r.first_error())
            .unwrap_or_else(|| {
                RawApiError::new(format!("HTTP {status}: {}", truncate_for_log(response_text)))
            });
        Err(self.map_error(raw.status(status), ctx))
    }

    /// 发送带 Bearer 头的请求
    async fn send_authorized(
        &self,
        request_builder: RequestBuilder,
        method: &str,
        url: &str,
        ctx: ErrorContext,
    ) -> Result<NicruResponse> {
        let token = self.bearer_token()?;
        let request = request_builder.bearer_auth(token);

        let (status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), method, url).await?;

        self.handle_response(status, &response_text, ctx)
    }

    // ==================== OAuth ====================

    /// 使用 password grant 获取 access token
    pub(crate) async fn request_token(&self) -> Result<AccessToken> {
        let url = self.url(OAUTH_TOKEN_PATH);
        let creds = &self.credentials;

        log::debug!(
            "[{}] Requesting access token for {} (client {}, scope {})",
            self.provider_name(),
            mask(&creds.username),
            mask(&creds.client_id),
            creds.scope
        );

        let form = [
            ("grant_type", "password"),
            ("username", creds.username.as_str()),
            ("password", creds.password.as_str()),
            ("scope", creds.scope.as_str()),
        ];

        let request = self
            .client
            .post(&url)
            .basic_auth(&creds.client_id, Some(&creds.client_secret))
            .form(&form);

        let (status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), "POST", &url).await?;

        if !(200..300).contains(&status) {
            let raw = serde_json::from_str::<OAuthErrorResponse>(&response_text)
                .map(RawApiError::from)
                .unwrap_or_else(|_| {
                    RawApiError::new(format!("HTTP {status}: {}", truncate_for_log(&response_text)))
                });
            return Err(self.map_error(raw.status(status), ErrorContext::default()));
        }

        let token: TokenResponse = HttpUtils::parse_json(&response_text, self.provider_name())?;
        if token.access_token.is_empty() {
            return Err(self.parse_error("empty access_token in token response"));
        }

        Ok(AccessToken::new(
            token.access_token,
            token.token_type,
            token.expires_in,
        ))
    }

    // ==================== dns-master ====================

    /// 执行 GET 请求
    pub(crate) async fn get(&self, path: &str, ctx: ErrorContext) -> Result<NicruResponse> {
        let url = self.url(path);
        let request = self.client.get(&url);
        self.send_authorized(request, "GET", &url, ctx).await
    }

    /// 执行 PUT 请求（XML body）
    pub(crate) async fn put<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<NicruResponse> {
        let payload = quick_xml::se::to_string(body)
            .map(|xml| format!("{XML_DECLARATION}{xml}"))
            .map_err(|e| ProviderError::SerializationError {
                provider: self.provider_name().to_string(),
                detail: e.to_string(),
            })?;

        log::debug!("Request Body: {payload}");

        let url = self.url(path);
        let request = self
            .client
            .put(&url)
            .header("Content-Type", "text/xml; charset=utf-8")
            .body(payload);
        self.send_authorized(request, "PUT", &url, ctx).await
    }

    /// 执行 POST 请求（无 body）
    pub(crate) async fn post(&self, path: &str, ctx: ErrorContext) -> Result<NicruResponse> {
        let url = self.url(path);
        let request = self.client.post(&url);
        self.send_authorized(request, "POST", &url, ctx).await
    }

    /// 执行 DELETE 请求
    pub(crate) async fn delete(&self, path: &str, ctx: ErrorContext) -> Result<NicruResponse> {
        let url = self.url(path);
        let request = self.client.delete(&url);
        self.send_authorized(request, "DELETE", &url, ctx).await
    }
}
