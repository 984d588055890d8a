//! Provider 公共工具函数

use std::time::Duration;

use reqwest::Client;

// ============ HTTP Client ============

/// 默认连接超时（秒）
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// 创建带超时配置的 HTTP Client
///
/// TLS 后端初始化失败时退回到 `Client::new()`（无自定义超时）。
pub fn create_http_client(request_timeout: Duration) -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(request_timeout)
        .user_agent(concat!("nicru-dns-provider/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("Failed to build configured HTTP client, using defaults: {e}");
            Client::new()
        })
}

// ============ 路径处理 ============

/// 对 URL 路径段进行编码（服务名、区域名、记录 ID）
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// 去掉末尾的 `/`
pub fn normalize_base_url(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_segment_escapes_reserved() {
        assert_eq!(encode_segment("example.com"), "example.com");
        assert_eq!(encode_segment("my svc/1"), "my%20svc%2F1");
    }

    #[test]
    fn normalize_base_url_trims_slash() {
        assert_eq!(normalize_base_url("https://api.nic.ru/"), "https://api.nic.ru");
        assert_eq!(normalize_base_url("http://127.0.0.1:8080"), "http://127.0.0.1:8080");
    }
}
