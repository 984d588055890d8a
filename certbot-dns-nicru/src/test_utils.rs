//! 测试辅助模块
//!
//! 提供 mock `DnsApi` 实现和便捷的测试工厂方法。

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use nicru_dns_provider::{
    Credentials, DnsApi, ProviderError, RemoteRecord, Result, TxtRecordRequest,
};
use tokio::sync::Mutex;

use crate::traits::ClientFactory;

pub fn test_credentials() -> Credentials {
    Credentials {
        client_id: "app-id".to_string(),
        client_secret: "app-secret".to_string(),
        username: "123456/NIC-D".to_string(),
        password: "hunter2".to_string(),
        scope: "GET:/dns-master/.+".to_string(),
        service: "EXAMPLE-SVC".to_string(),
        zone: "example.com".to_string(),
    }
}

/// 记录下来的 API 调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Authenticate,
    AddRecord(TxtRecordRequest),
    ListRecords,
    DeleteRecord(String),
    Commit,
}

/// 注入失败的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Authenticate,
    AddRecord,
    ListRecords,
    DeleteRecord,
    Commit,
}

#[derive(Default)]
struct MockState {
    calls: Vec<Call>,
    records: Vec<RemoteRecord>,
    fail_on: Vec<FailOn>,
    next_id: usize,
}

// ===== MockDnsApi =====

/// 共享状态的 mock：同时作为 `ClientFactory`，创建的每个句柄都写入同一个调用日志。
#[derive(Clone, Default)]
pub struct MockDnsApi {
    state: Arc<Mutex<MockState>>,
    handles: Arc<AtomicUsize>,
    authenticated: bool,
}

impl MockDnsApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_records(&self, records: Vec<RemoteRecord>) {
        self.state.lock().await.records = records;
    }

    pub async fn fail_on(&self, op: FailOn) {
        self.state.lock().await.fail_on.push(op);
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.state.lock().await.calls.clone()
    }

    pub fn handles_created(&self) -> usize {
        self.handles.load(Ordering::SeqCst)
    }

    /// 记录调用并检查注入的失败
    async fn record(&self, call: Call, op: FailOn) -> Result<()> {
        let mut state = self.state.lock().await;
        state.calls.push(call);

        if op != FailOn::Authenticate && !self.authenticated {
            return Err(ProviderError::NotAuthenticated {
                provider: "mock".to_string(),
            });
        }

        if state.fail_on.contains(&op) {
            return Err(match op {
                FailOn::Authenticate => ProviderError::InvalidCredentials {
                    provider: "mock".to_string(),
                    raw_message: Some("Bad credentials".to_string()),
                },
                _ => ProviderError::Unknown {
                    provider: "mock".to_string(),
                    raw_code: None,
                    raw_message: format!("injected {op:?} failure"),
                },
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DnsApi for MockDnsApi {
    async fn authenticate(&mut self) -> Result<()> {
        self.record(Call::Authenticate, FailOn::Authenticate).await?;
        self.authenticated = true;
        Ok(())
    }

    async fn add_record(&self, record: &TxtRecordRequest) -> Result<()> {
        self.record(Call::AddRecord(record.clone()), FailOn::AddRecord)
            .await?;

        let mut state = self.state.lock().await;
        state.next_id += 1;
        let id = format!("mock-{}", state.next_id);
        state.records.push(RemoteRecord {
            id,
            name: record.name.clone(),
            record_type: Some("TXT".to_string()),
            ttl: Some(record.ttl),
            txt: vec![record.value.clone()],
        });
        Ok(())
    }

    async fn list_records(&self) -> Result<Vec<RemoteRecord>> {
        self.record(Call::ListRecords, FailOn::ListRecords).await?;
        Ok(self.state.lock().await.records.clone())
    }

    async fn delete_record(&self, record_id: &str) -> Result<()> {
        self.record(Call::DeleteRecord(record_id.to_string()), FailOn::DeleteRecord)
            .await?;
        self.state
            .lock()
            .await
            .records
            .retain(|r| r.id != record_id);
        Ok(())
    }

    async fn commit(&self) -> Result<()> {
        self.record(Call::Commit, FailOn::Commit).await
    }
}

impl ClientFactory for MockDnsApi {
    fn create(&self, _credentials: &Credentials) -> Box<dyn DnsApi> {
        self.handles.fetch_add(1, Ordering::SeqCst);
        Box::new(Self {
            state: Arc::clone(&self.state),
            handles: Arc::clone(&self.handles),
            authenticated: false,
        })
    }
}
