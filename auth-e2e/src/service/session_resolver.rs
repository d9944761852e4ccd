// auth-e2e/src/service/session_resolver.rs

use std::fmt;
use std::sync::Arc;

use crate::api::dto::auth_dto::{LoginData, LoginRequest};
use crate::api::AuthApiClient;
use crate::config::{FallbackPolicy, SuiteConfig};
use crate::domain::session_descriptor::SessionDescriptor;
use crate::domain::signup_record::SignupRecord;
use crate::error::{SuiteError, SuiteResult};
use crate::log_with_context;
use crate::service::credential_store::CredentialStore;
use crate::shared::constants::messages;
use crate::types::ApiReply;
use crate::utils::validation::is_well_formed_token;

/// どちらのパスワードで認証できたか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordTier {
    /// サインアップ時に記録したパスワード
    Primary,
    /// 設定で与えられたフォールバックパスワード
    Fallback,
}

impl fmt::Display for PasswordTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordTier::Primary => write!(f, "primary"),
            PasswordTier::Fallback => write!(f, "fallback"),
        }
    }
}

/// 永続化されたサインアップ記録から認証済みセッションを再構築する
pub struct SessionResolver {
    client: AuthApiClient,
    store: Arc<dyn CredentialStore>,
    fallback_password: String,
    fallback_policy: FallbackPolicy,
}

impl SessionResolver {
    pub fn new(
        config: &SuiteConfig,
        client: AuthApiClient,
        store: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            client,
            store,
            fallback_password: config.fallback_password.clone(),
            fallback_policy: config.fallback_policy,
        }
    }

    pub fn fallback_password(&self) -> &str {
        &self.fallback_password
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// セッションを解決し、記述子を保存して返す
    pub async fn resolve_session(&self) -> SuiteResult<SessionDescriptor> {
        let (descriptor, _) = self.resolve_with_tier().await?;
        Ok(descriptor)
    }

    /// `resolve_session` と同じだが、成功したパスワードの段階も返す
    pub async fn resolve_with_tier(&self) -> SuiteResult<(SessionDescriptor, PasswordTier)> {
        let record = self.store.read_signup_record().await?;

        let primary = self.attempt(&record, &record.password).await?;
        let (reply, tier) = if primary.is_ok() {
            (primary, PasswordTier::Primary)
        } else if !self.fallback_policy.permits(primary.status) {
            return Err(SuiteError::from_status("login", primary.status, &primary.text));
        } else {
            log_with_context!(
                tracing::Level::WARN,
                "Primary password failed, trying fallback password",
                "email" => &record.email,
                "status" => primary.status.as_u16(),
            );

            let fallback = self.attempt(&record, &self.fallback_password).await?;
            if !fallback.is_ok() {
                return Err(SuiteError::AuthenticationExhausted {
                    email: record.email.clone(),
                    user_type: record.user_type,
                    primary_password: record.password.clone(),
                    primary_status: primary.status,
                    fallback_password: self.fallback_password.clone(),
                    fallback_status: fallback.status,
                    response: fallback.text,
                });
            }
            (fallback, PasswordTier::Fallback)
        };

        let descriptor = Self::validate(&reply, &record)?;
        self.store.write_session_descriptor(&descriptor).await?;

        log_with_context!(
            tracing::Level::INFO,
            "Session resolved",
            "email" => &descriptor.email,
            "user_type" => descriptor.user_type,
            "tier" => tier,
        );

        Ok((descriptor, tier))
    }

    async fn attempt(&self, record: &SignupRecord, password: &str) -> SuiteResult<ApiReply> {
        self.client
            .login(&LoginRequest::new(&record.email, password, record.user_type))
            .await
    }

    fn validate(reply: &ApiReply, record: &SignupRecord) -> SuiteResult<SessionDescriptor> {
        if reply.message() != Some(messages::LOGIN_SUCCESS) {
            tracing::warn!(
                "Unexpected login message for {}: {:?}",
                record.email,
                reply.message()
            );
        }

        let data: LoginData = reply.data("login")?;
        if !is_well_formed_token(&data.token) {
            return Err(SuiteError::TransientService(format!(
                "malformed login response: token is not three dot-separated segments (body: {})",
                reply.text
            )));
        }

        Ok(SessionDescriptor::from_login(data, record.user_type))
    }
}
