// src/error.rs

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::user_type::UserType;

#[derive(Error, Debug)]
pub enum SuiteError {
    /// 前段のステージが書き込むはずのレコードが存在しない
    #[error("{record} not found: {hint}")]
    SetupOrder {
        record: &'static str,
        hint: &'static str,
    },

    #[error(
        "login failed with primary and fallback passwords\n\n\
         Email: {email}\n\
         UserType: {user_type}\n\n\
         Primary Password: {primary_password} (status {primary_status})\n\
         Fallback Password: {fallback_password} (status {fallback_status})\n\n\
         API Response:\n{response}"
    )]
    AuthenticationExhausted {
        email: String,
        user_type: UserType,
        primary_password: String,
        primary_status: StatusCode,
        fallback_password: String,
        fallback_status: StatusCode,
        response: String,
    },

    #[error("Transient service error: {0}")]
    TransientService(String),

    #[error("{operation} returned unexpected status {status}: {body}")]
    UnexpectedStatus {
        operation: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Expectation failed: {0}")]
    ExpectationFailed(String),

    #[error("Invalid stage plan: {0}")]
    InvalidPlan(String),

    #[error("OTP view endpoint unavailable: {0}")]
    OtpUnavailable(String),
}

impl From<reqwest::Error> for SuiteError {
    fn from(err: reqwest::Error) -> Self {
        // タイムアウト・接続失敗はすべて一時的な障害として扱う（リトライはしない）
        if err.is_timeout() {
            SuiteError::TransientService(format!("request timed out: {}", err))
        } else if err.is_connect() {
            SuiteError::TransientService(format!("connection failed: {}", err))
        } else {
            SuiteError::TransientService(err.to_string())
        }
    }
}

impl SuiteError {
    /// OK 以外のステータスを、サーバー側障害かそれ以外かで振り分ける
    pub fn from_status(operation: &'static str, status: StatusCode, body: &str) -> Self {
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            SuiteError::TransientService(format!(
                "{} returned {}: {}",
                operation, status, body
            ))
        } else {
            SuiteError::UnexpectedStatus {
                operation,
                status,
                body: body.to_string(),
            }
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, SuiteError::TransientService(_))
    }

    pub fn is_setup_order(&self) -> bool {
        matches!(self, SuiteError::SetupOrder { .. })
    }
}

pub type SuiteResult<T> = Result<T, SuiteError>;
