// auth-e2e/src/service/credential_store.rs

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::session_descriptor::SessionDescriptor;
use crate::domain::signup_record::SignupRecord;
use crate::error::{SuiteError, SuiteResult};
use crate::shared::constants::{SESSION_DESCRIPTOR_FILE, SIGNUP_RECORD_FILE};

const SIGNUP_MISSING_HINT: &str = "Run the signup stage first.";
const SESSION_MISSING_HINT: &str = "Resolve a session (login stage) first.";

/// 実行をまたいで共有される資格情報ストア
///
/// どちらのレコードも1件のみ保持し、書き込みは常に上書きします。
/// 読み込み時にレコードがなければ `SuiteError::SetupOrder` を返します。
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn write_signup_record(&self, record: &SignupRecord) -> SuiteResult<()>;

    async fn read_signup_record(&self) -> SuiteResult<SignupRecord>;

    async fn write_session_descriptor(&self, descriptor: &SessionDescriptor) -> SuiteResult<()>;

    async fn read_session_descriptor(&self) -> SuiteResult<SessionDescriptor>;
}

/// ディレクトリ配下のJSONファイルに保存するストア
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    root: PathBuf,
}

impl FileCredentialStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn signup_record_path(&self) -> PathBuf {
        self.root.join(SIGNUP_RECORD_FILE)
    }

    pub fn session_descriptor_path(&self) -> PathBuf {
        self.root.join(SESSION_DESCRIPTOR_FILE)
    }

    /// 一時ファイルに書き込んでからリネームする
    async fn write_json<T: Serialize>(&self, file_name: &str, value: &T) -> SuiteResult<()> {
        tokio::fs::create_dir_all(&self.root).await?;

        let path = self.root.join(file_name);
        let tmp = self
            .root
            .join(format!("{}.tmp-{}", file_name, Uuid::new_v4().simple()));

        let json = serde_json::to_vec_pretty(value)?;
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&json).await?;
        file.sync_all().await?;
        drop(file);

        if let Err(err) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(err.into());
        }

        tracing::debug!(path = %path.display(), "Credential record written");
        Ok(())
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        file_name: &str,
        record: &'static str,
        hint: &'static str,
    ) -> SuiteResult<T> {
        let path = self.root.join(file_name);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(SuiteError::SetupOrder { record, hint });
            }
            Err(err) => return Err(err.into()),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn write_signup_record(&self, record: &SignupRecord) -> SuiteResult<()> {
        self.write_json(SIGNUP_RECORD_FILE, record).await
    }

    async fn read_signup_record(&self) -> SuiteResult<SignupRecord> {
        self.read_json(SIGNUP_RECORD_FILE, SIGNUP_RECORD_FILE, SIGNUP_MISSING_HINT)
            .await
    }

    async fn write_session_descriptor(&self, descriptor: &SessionDescriptor) -> SuiteResult<()> {
        self.write_json(SESSION_DESCRIPTOR_FILE, descriptor).await
    }

    async fn read_session_descriptor(&self) -> SuiteResult<SessionDescriptor> {
        self.read_json(
            SESSION_DESCRIPTOR_FILE,
            SESSION_DESCRIPTOR_FILE,
            SESSION_MISSING_HINT,
        )
        .await
    }
}

/// プロセス内だけで完結するストア（テスト用）
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    signup: Arc<RwLock<Option<SignupRecord>>>,
    session: Arc<RwLock<Option<SessionDescriptor>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_signup_record(record: SignupRecord) -> Self {
        Self {
            signup: Arc::new(RwLock::new(Some(record))),
            session: Arc::default(),
        }
    }

    pub async fn has_session_descriptor(&self) -> bool {
        self.session.read().await.is_some()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn write_signup_record(&self, record: &SignupRecord) -> SuiteResult<()> {
        *self.signup.write().await = Some(record.clone());
        Ok(())
    }

    async fn read_signup_record(&self) -> SuiteResult<SignupRecord> {
        self.signup
            .read()
            .await
            .clone()
            .ok_or(SuiteError::SetupOrder {
                record: SIGNUP_RECORD_FILE,
                hint: SIGNUP_MISSING_HINT,
            })
    }

    async fn write_session_descriptor(&self, descriptor: &SessionDescriptor) -> SuiteResult<()> {
        *self.session.write().await = Some(descriptor.clone());
        Ok(())
    }

    async fn read_session_descriptor(&self) -> SuiteResult<SessionDescriptor> {
        self.session
            .read()
            .await
            .clone()
            .ok_or(SuiteError::SetupOrder {
                record: SESSION_DESCRIPTOR_FILE,
                hint: SESSION_MISSING_HINT,
            })
    }
}
