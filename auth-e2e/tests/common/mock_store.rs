// tests/common/mock_store.rs

use async_trait::async_trait;
use auth_e2e::error::SuiteResult;
use auth_e2e::{CredentialStore, InMemoryCredentialStore, SessionDescriptor, SignupRecord};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 書き込み回数を数えるテスト用ストア
#[derive(Clone, Default)]
pub struct CountingCredentialStore {
    inner: InMemoryCredentialStore,
    descriptor_writes: Arc<AtomicUsize>,
}

impl CountingCredentialStore {
    pub fn with_signup_record(record: SignupRecord) -> Self {
        Self {
            inner: InMemoryCredentialStore::with_signup_record(record),
            descriptor_writes: Arc::default(),
        }
    }

    pub fn descriptor_writes(&self) -> usize {
        self.descriptor_writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialStore for CountingCredentialStore {
    async fn write_signup_record(&self, record: &SignupRecord) -> SuiteResult<()> {
        self.inner.write_signup_record(record).await
    }

    async fn read_signup_record(&self) -> SuiteResult<SignupRecord> {
        self.inner.read_signup_record().await
    }

    async fn write_session_descriptor(&self, descriptor: &SessionDescriptor) -> SuiteResult<()> {
        self.descriptor_writes.fetch_add(1, Ordering::SeqCst);
        self.inner.write_session_descriptor(descriptor).await
    }

    async fn read_session_descriptor(&self) -> SuiteResult<SessionDescriptor> {
        self.inner.read_session_descriptor().await
    }
}
