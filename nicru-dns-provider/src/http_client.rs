//! Request execution shared by the OAuth and `dns-master` calls
//!
//! Callers build the `RequestBuilder` (auth header, form or XML body); this
//! module sends it once, logs it and hands back the status and body text.
//! Statuses that never carry a usable API answer are turned into errors here:
//! 429 becomes [`ProviderError::RateLimited`], 502–504 become
//! [`ProviderError::NetworkError`]. Everything else is left to the caller's
//! envelope handling.

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

pub struct HttpUtils;

impl HttpUtils {
    /// Send `request_builder` and return `(status, body)`.
    ///
    /// `method_name` and `url` are only used for logging.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{provider_name}] {method_name} {url}");

        let response = request_builder
            .send()
            .await
            .map_err(|e| Self::transport_error(provider_name, &e))?;

        let status = response.status().as_u16();
        log::debug!("[{provider_name}] {method_name} {url} -> {status}");

        match status {
            429 => Err(Self::rate_limited(provider_name, response).await),
            502..=504 => {
                let body = response.text().await.unwrap_or_default();
                log::warn!("[{provider_name}] Gateway error (HTTP {status})");
                Err(ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: format!("HTTP {status}: {}", truncate_for_log(&body)),
                })
            }
            _ => {
                let body = response
                    .text()
                    .await
                    .map_err(|e| ProviderError::NetworkError {
                        provider: provider_name.to_string(),
                        detail: format!("Failed to read response body: {e}"),
                    })?;
                log::debug!("[{provider_name}] Response Body: {}", truncate_for_log(&body));
                Ok((status, body))
            }
        }
    }

    fn transport_error(provider_name: &str, err: &reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout {
                provider: provider_name.to_string(),
                detail: err.to_string(),
            }
        } else {
            ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: err.to_string(),
            }
        }
    }

    async fn rate_limited(provider_name: &str, response: Response) -> ProviderError {
        // Retry-After must be read before the body consumes the response
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let body = response.text().await.unwrap_or_default();

        log::warn!("[{provider_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
        ProviderError::RateLimited {
            provider: provider_name.to_string(),
            retry_after,
            raw_message: (!body.is_empty()).then_some(body),
        }
    }

    /// Decode an OAuth JSON body; failures become [`ProviderError::ParseError`].
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text)
            .map_err(|e| Self::parse_failure(provider_name, "JSON", response_text, &e))
    }

    /// Decode a `dns-master` XML body; failures become [`ProviderError::ParseError`].
    pub fn parse_xml<T>(response_text: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        quick_xml::de::from_str(response_text)
            .map_err(|e| Self::parse_failure(provider_name, "XML", response_text, &e))
    }

    fn parse_failure(
        provider_name: &str,
        format: &str,
        response_text: &str,
        err: &dyn std::fmt::Display,
    ) -> ProviderError {
        log::error!(
            "[{provider_name}] {format} parse failed: {err}; body: {}",
            truncate_for_log(response_text)
        );
        ProviderError::ParseError {
            provider: provider_name.to_string(),
            detail: err.to_string(),
        }
    }
}
