// auth-e2e/src/api/client.rs

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::time::Instant;
use tokio::task::JoinSet;
use uuid::Uuid;

use crate::api::dto::auth_dto::{
    ChangePasswordRequest, LoginData, LoginRequest, ResetPasswordRequest, RolesRequest,
    SendEmailOtpRequest, SendSmsOtpRequest, SignupRequest, SwitchAccountRequest,
    VerifyEmailRequest, VerifyPhoneRequest, ViewOtpRequest,
};
use crate::config::{ConfigError, SuiteConfig};
use crate::domain::session_descriptor::SessionDescriptor;
use crate::error::{SuiteError, SuiteResult};
use crate::log_with_context;
use crate::logging::level_for_status;
use crate::shared::constants::endpoints;
use crate::types::ApiReply;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// 認証APIに対するHTTPクライアント
///
/// すべての呼び出しはステータスと生のボディを `ApiReply` として返し、
/// ステータスの判定は呼び出し側で行います。
#[derive(Debug, Clone)]
pub struct AuthApiClient {
    client: Client,
    base_url: Url,
    otp_view_allowed: bool,
}

impl AuthApiClient {
    pub fn new(config: &SuiteConfig) -> SuiteResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(format!("auth-e2e/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                key: "REQUEST_TIMEOUT_MS",
                reason: format!("failed to create HTTP client: {}", e),
            })?;

        tracing::info!(
            "Created AuthApiClient for base_url: {}, timeout: {}ms",
            config.base_url,
            config.request_timeout.as_millis()
        );

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            otp_view_allowed: config.otp_view_allowed(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> SuiteResult<Url> {
        self.base_url.join(path).map_err(|e| {
            ConfigError::InvalidValue {
                key: "BASE_URL",
                reason: format!("cannot join `{}`: {}", path, e),
            }
            .into()
        })
    }

    /// 任意のJSONボディを送信する（否定系シナリオ用）
    pub async fn send_json(
        &self,
        path: &str,
        body: Value,
        bearer: Option<&str>,
    ) -> SuiteResult<ApiReply> {
        self.execute(path, Some(body), bearer).await
    }

    async fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> SuiteResult<ApiReply> {
        self.execute(path, Some(serde_json::to_value(body)?), bearer)
            .await
    }

    async fn execute(
        &self,
        path: &str,
        body: Option<Value>,
        bearer: Option<&str>,
    ) -> SuiteResult<ApiReply> {
        let url = self.endpoint(path)?;
        let request_id = Uuid::new_v4().to_string();

        let mut request = self
            .client
            .post(url)
            .header(REQUEST_ID_HEADER, request_id.as_str());
        if let Some(token) = bearer {
            // 空トークンもそのまま送る（未認証シナリオ）
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let started = Instant::now();
        let response = request.send().await.map_err(|e| {
            log_with_context!(
                tracing::Level::WARN,
                "Request failed",
                "request_id" => &request_id,
                "path" => path,
                "error" => e.to_string(),
            );
            SuiteError::from(e)
        })?;

        let status = response.status();
        let text = response.text().await?;

        log_with_context!(
            level_for_status(status.as_u16()),
            "Request completed",
            "request_id" => &request_id,
            "path" => path,
            "status" => status.as_u16(),
            "elapsed_ms" => started.elapsed().as_millis(),
        );

        Ok(ApiReply::new(status, text))
    }

    pub async fn signup(&self, request: &SignupRequest) -> SuiteResult<ApiReply> {
        self.post(endpoints::SIGNUP, request, None).await
    }

    pub async fn login(&self, request: &LoginRequest) -> SuiteResult<ApiReply> {
        self.post(endpoints::LOGIN, request, None).await
    }

    pub async fn check_roles(&self, email: &str) -> SuiteResult<ApiReply> {
        let request = RolesRequest {
            email: email.to_string(),
        };
        self.post(endpoints::ROLES, &request, None).await
    }

    /// ボディなしでトークンの有効性だけを確認する
    pub async fn is_authenticated(&self, bearer: &str) -> SuiteResult<ApiReply> {
        self.execute(endpoints::IS_AUTHENTICATED, None, Some(bearer))
            .await
    }

    pub async fn switch_account(
        &self,
        bearer: &str,
        request: &SwitchAccountRequest,
    ) -> SuiteResult<ApiReply> {
        self.post(endpoints::SWITCH_ACCOUNT, request, Some(bearer))
            .await
    }

    pub async fn send_otp_email(&self, request: &SendEmailOtpRequest) -> SuiteResult<ApiReply> {
        self.post(endpoints::SEND_OTP_EMAIL, request, None).await
    }

    pub async fn send_otp_sms(&self, phone_number: &str) -> SuiteResult<ApiReply> {
        let request = SendSmsOtpRequest {
            phone_number: phone_number.to_string(),
        };
        self.post(endpoints::SEND_OTP_SMS, &request, None).await
    }

    pub async fn verify_email(&self, request: &VerifyEmailRequest) -> SuiteResult<ApiReply> {
        self.post(endpoints::VERIFY_EMAIL, request, None).await
    }

    pub async fn verify_phone(&self, request: &VerifyPhoneRequest) -> SuiteResult<ApiReply> {
        self.post(endpoints::VERIFY_PHONE, request, None).await
    }

    /// テスト環境専用エンドポイントから発行済みOTPを取得
    pub async fn view_otp(&self, identifier: &str) -> SuiteResult<String> {
        if !self.otp_view_allowed {
            return Err(SuiteError::OtpUnavailable(format!(
                "the OTP view endpoint is only available in test environments (base url: {}); \
                 set ALLOW_OTP_VIEW=true if this is one",
                self.base_url
            )));
        }

        let request = ViewOtpRequest {
            identifier: identifier.to_string(),
        };
        let reply = self.post(endpoints::VIEW_OTP, &request, None).await?;
        if reply.status != StatusCode::OK {
            return Err(SuiteError::OtpUnavailable(format!(
                "failed to retrieve OTP: {} - {}",
                reply.status, reply.text
            )));
        }

        match reply.data::<Value>("view otp")? {
            Value::String(otp) => Ok(otp),
            Value::Number(otp) => Ok(otp.to_string()),
            other => Err(SuiteError::TransientService(format!(
                "malformed view otp response: unexpected data {}",
                other
            ))),
        }
    }

    pub async fn change_password(
        &self,
        bearer: &str,
        request: &ChangePasswordRequest,
    ) -> SuiteResult<ApiReply> {
        self.post(endpoints::CHANGE_PASSWORD, request, Some(bearer))
            .await
    }

    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> SuiteResult<ApiReply> {
        self.post(endpoints::RESET_PASSWORD, request, None).await
    }

    /// ユーザーを登録してログインし、セッション記述子を返す
    ///
    /// ストアには書き込まない。
    pub async fn create_authenticated_user(
        &self,
        signup: &SignupRequest,
    ) -> SuiteResult<SessionDescriptor> {
        let reply = self.signup(signup).await?;
        if reply.status != StatusCode::CREATED && reply.status != StatusCode::OK {
            return Err(SuiteError::from_status("signup", reply.status, &reply.text));
        }

        let mut login = LoginRequest::new(&signup.email, &signup.password, signup.user_type);
        if let Some(team_id) = &signup.team_id {
            login = login.with_team(team_id);
        }

        let reply = self.login(&login).await?;
        if reply.status != StatusCode::OK {
            return Err(SuiteError::from_status("login", reply.status, &reply.text));
        }

        let data: LoginData = reply.data("login")?;
        Ok(SessionDescriptor::from_login(data, signup.user_type))
    }

    /// 同じリクエストを `count` 件同時に発行し、すべての結果を集める
    ///
    /// 結果の順序は保証しない。リトライもしない。
    pub async fn fire_and_collect<F, Fut>(&self, count: usize, f: F) -> Vec<SuiteResult<ApiReply>>
    where
        F: Fn(AuthApiClient) -> Fut,
        Fut: Future<Output = SuiteResult<ApiReply>> + Send + 'static,
    {
        let mut set = JoinSet::new();
        for _ in 0..count {
            set.spawn(f(self.clone()));
        }

        let mut outcomes = Vec::with_capacity(count);
        while let Some(joined) = set.join_next().await {
            outcomes.push(joined.unwrap_or_else(|e| {
                Err(SuiteError::TransientService(format!(
                    "burst request task failed: {}",
                    e
                )))
            }));
        }
        outcomes
    }
}
