// src/config.rs
use dotenvy::dotenv;
use reqwest::{StatusCode, Url};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::shared::constants::{
    passwords, DEFAULT_STORE_DIR, DEFAULT_TEAM_ONE_ID, DEFAULT_TEAM_TWO_ID,
};

/// 設定読み込みエラー
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingVar(&'static str),

    #[error("Invalid {key} value: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// 一次パスワードが拒否されたときにフォールバックを試す条件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// 401 UNAUTHORIZED のときだけフォールバックする
    #[default]
    CredentialRejection,
    /// OK 以外ならどのステータスでもフォールバックする
    AnyFailure,
}

impl FallbackPolicy {
    pub fn permits(&self, status: StatusCode) -> bool {
        match self {
            FallbackPolicy::CredentialRejection => status == StatusCode::UNAUTHORIZED,
            FallbackPolicy::AnyFailure => status != StatusCode::OK,
        }
    }
}

impl FromStr for FallbackPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "credential" | "credential_rejection" | "credential-rejection" => {
                Ok(FallbackPolicy::CredentialRejection)
            }
            "any" | "any_failure" | "any-failure" => Ok(FallbackPolicy::AnyFailure),
            other => Err(ConfigError::InvalidValue {
                key: "FALLBACK_POLICY",
                reason: format!("expected `credential` or `any`, got `{}`", other),
            }),
        }
    }
}

/// マーチャントチームの切り替えに使うチームID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamIds {
    pub team_one: String,
    pub team_two: String,
}

/// 事前に用意された複数ロールのアカウント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestAccount {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct SuiteConfig {
    pub base_url: Url,
    pub fallback_password: String,
    pub fallback_policy: FallbackPolicy,
    pub request_timeout: Duration,
    pub store_dir: PathBuf,
    pub allow_otp_view: bool,
    pub team_ids: TeamIds,
    pub multi_role_account: Option<TestAccount>,
    /// カンマ区切りのステージ名（未指定なら全ステージ）
    pub stages: Option<String>,
}

impl SuiteConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok(); // .env ファイルを読み込む (存在しなくてもエラーにしない)

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を組み立てる
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 空文字は未設定として扱う
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let base_url =
            parse_base_url(&get("BASE_URL").ok_or(ConfigError::MissingVar("BASE_URL"))?)?;

        let fallback_password = get("FALLBACK_PASSWORD")
            .or_else(|| get("PASSWORD"))
            .ok_or(ConfigError::MissingVar("FALLBACK_PASSWORD or PASSWORD"))?;

        let fallback_policy = match get("FALLBACK_POLICY") {
            Some(value) => value.parse()?,
            None => FallbackPolicy::default(),
        };

        let timeout_ms: u64 = get("REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|| "30000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "REQUEST_TIMEOUT_MS",
                reason: "must be a positive integer".to_string(),
            })?;
        if timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "REQUEST_TIMEOUT_MS",
                reason: "must be a positive integer".to_string(),
            });
        }

        let allow_otp_view = match get("ALLOW_OTP_VIEW") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "ALLOW_OTP_VIEW",
                reason: format!("expected `true` or `false`, got `{}`", value),
            })?,
            None => false,
        };

        // メールアドレスを指定した場合はパスワードも必須
        let multi_role_account = match get("TEST_MULTI_ROLE_EMAIL") {
            Some(email) => Some(TestAccount {
                email,
                password: get("TEST_MULTI_ROLE_PASSWORD")
                    .ok_or(ConfigError::MissingVar("TEST_MULTI_ROLE_PASSWORD"))?,
            }),
            None => None,
        };

        Ok(Self {
            base_url,
            fallback_password,
            fallback_policy,
            request_timeout: Duration::from_millis(timeout_ms),
            store_dir: get("CREDENTIAL_STORE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR)),
            allow_otp_view,
            team_ids: TeamIds {
                team_one: get("TEST_TEAM_ONE_ID")
                    .unwrap_or_else(|| DEFAULT_TEAM_ONE_ID.to_string()),
                team_two: get("TEST_TEAM_TWO_ID")
                    .unwrap_or_else(|| DEFAULT_TEAM_TWO_ID.to_string()),
            },
            multi_role_account,
            stages: get("SUITE_STAGES"),
        })
    }

    /// テスト用の設定を作成（モックサーバーのURLを指定）
    pub fn for_testing(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            fallback_password: passwords::VALID_ALT.to_string(),
            fallback_policy: FallbackPolicy::default(),
            request_timeout: Duration::from_secs(5),
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
            allow_otp_view: true,
            team_ids: TeamIds {
                team_one: DEFAULT_TEAM_ONE_ID.to_string(),
                team_two: DEFAULT_TEAM_TWO_ID.to_string(),
            },
            multi_role_account: None,
            stages: None,
        })
    }

    /// テスト専用のOTP参照エンドポイントを使ってよいか
    pub fn otp_view_allowed(&self) -> bool {
        self.allow_otp_view
            || self
                .base_url
                .host_str()
                .is_some_and(|host| host.contains("test."))
    }
}

/// ベースURLを検証し、相対パスを結合できるよう末尾に `/` を付与
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidValue {
        key: "BASE_URL",
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidValue {
            key: "BASE_URL",
            reason: format!("`{}` cannot be used as a base URL", raw),
        });
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
