//! nic.ru API 类型定义
//!
//! OAuth 端点返回 JSON，`dns-master` 端点使用 XML。

use serde::{Deserialize, Serialize};

use crate::traits::RawApiError;
use crate::types::{RemoteRecord, TxtRecordRequest};

// ============ OAuth ============

/// OAuth token 响应
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expires_in: Option<i64>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// OAuth 错误响应（RFC 6749 §5.2）
#[derive(Debug, Deserialize)]
pub struct OAuthErrorResponse {
    pub error: String,
    pub error_description: Option<String>,
}

impl From<OAuthErrorResponse> for RawApiError {
    fn from(e: OAuthErrorResponse) -> Self {
        let message = e.error_description.unwrap_or_else(|| e.error.clone());
        Self::with_code(e.error, message)
    }
}

// ============ dns-master 响应 ============

/// `<response>` 通用外层结构
#[derive(Debug, Deserialize)]
pub struct NicruResponse {
    pub status: String,
    #[serde(default)]
    pub errors: Option<NicruErrors>,
    #[serde(default)]
    pub data: Option<NicruData>,
}

impl NicruResponse {
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }

    /// 第一条 `<error>`（如果有）
    pub fn first_error(&self) -> Option<RawApiError> {
        self.errors
            .as_ref()
            .and_then(|errors| errors.items.first())
            .map(|e| match &e.code {
                Some(code) => RawApiError::with_code(code.clone(), e.message.trim()),
                None => RawApiError::new(e.message.trim()),
            })
    }

    /// 展开所有 `<zone>` 下的 `<rr>`
    pub fn into_records(self) -> Vec<RemoteRecord> {
        self.data
            .map(|data| data.zones)
            .unwrap_or_default()
            .into_iter()
            .flat_map(|zone| zone.records)
            .map(RemoteRecord::from)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct NicruErrors {
    #[serde(rename = "error", default)]
    pub items: Vec<NicruErrorItem>,
}

#[derive(Debug, Deserialize)]
pub struct NicruErrorItem {
    #[serde(rename = "@code", default)]
    pub code: Option<String>,
    #[serde(rename = "$text", default)]
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NicruData {
    #[serde(rename = "zone", default)]
    pub zones: Vec<NicruZone>,
}

/// `<zone>` 节点（属性 `name`/`service`/`has-changes` 不需要）
#[derive(Debug, Deserialize)]
pub struct NicruZone {
    #[serde(rename = "rr", default)]
    pub records: Vec<NicruRecord>,
}

/// `<rr>` 节点（SOA/NS/MX 等子节点会被忽略）
#[derive(Debug, Deserialize)]
pub struct NicruRecord {
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub record_type: Option<String>,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub txt: Option<NicruTxt>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NicruTxt {
    #[serde(rename = "string", default)]
    pub strings: Vec<String>,
}

impl From<NicruRecord> for RemoteRecord {
    fn from(rr: NicruRecord) -> Self {
        Self {
            id: rr.id,
            name: rr.name,
            record_type: rr.record_type,
            ttl: rr.ttl,
            txt: rr.txt.map(|t| t.strings).unwrap_or_default(),
        }
    }
}

// ============ dns-master 请求 ============

/// `PUT .../records` 请求体
#[derive(Debug, Serialize)]
#[serde(rename = "request")]
pub struct AddRecordsRequest {
    #[serde(rename = "rr-list")]
    pub rr_list: RecordList,
}

#[derive(Debug, Serialize)]
pub struct RecordList {
    pub rr: Vec<NewRecord>,
}

#[derive(Debug, Serialize)]
pub struct NewRecord {
    pub name: String,
    pub ttl: u32,
    #[serde(rename = "type")]
    pub record_type: &'static str,
    pub txt: NicruTxt,
}

impl AddRecordsRequest {
    pub fn txt(record: &TxtRecordRequest) -> Self {
        Self {
            rr_list: RecordList {
                rr: vec![NewRecord {
                    name: record.name.clone(),
                    ttl: record.ttl,
                    record_type: "TXT",
                    txt: NicruTxt {
                        strings: vec![record.value.clone()],
                    },
                }],
            },
        }
    }
}
