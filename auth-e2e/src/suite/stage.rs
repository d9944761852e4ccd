// src/suite/stage.rs

use std::fmt;

use crate::error::{SuiteError, SuiteResult};

/// スイートを構成するステージ（定義順がデフォルトの実行順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Signup,
    Login,
    RoleCheck,
    ActiveUser,
    SwitchAccount,
    SendEmailOtp,
    SendSmsOtp,
    VerifyEmailOtp,
    VerifySmsOtp,
    ChangePassword,
    ResetPassword,
}

impl Stage {
    /// 文字列からStageに変換（kebab-case / snake_case、大文字小文字は区別しない）
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "signup" => Some(Self::Signup),
            "login" => Some(Self::Login),
            "role-check" => Some(Self::RoleCheck),
            "active-user" => Some(Self::ActiveUser),
            "switch-account" => Some(Self::SwitchAccount),
            "send-email-otp" => Some(Self::SendEmailOtp),
            "send-sms-otp" => Some(Self::SendSmsOtp),
            "verify-email-otp" => Some(Self::VerifyEmailOtp),
            "verify-sms-otp" => Some(Self::VerifySmsOtp),
            "change-password" => Some(Self::ChangePassword),
            "reset-password" => Some(Self::ResetPassword),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::Login => "login",
            Self::RoleCheck => "role-check",
            Self::ActiveUser => "active-user",
            Self::SwitchAccount => "switch-account",
            Self::SendEmailOtp => "send-email-otp",
            Self::SendSmsOtp => "send-sms-otp",
            Self::VerifyEmailOtp => "verify-email-otp",
            Self::VerifySmsOtp => "verify-sms-otp",
            Self::ChangePassword => "change-password",
            Self::ResetPassword => "reset-password",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::Signup,
            Self::Login,
            Self::RoleCheck,
            Self::ActiveUser,
            Self::SwitchAccount,
            Self::SendEmailOtp,
            Self::SendSmsOtp,
            Self::VerifyEmailOtp,
            Self::VerifySmsOtp,
            Self::ChangePassword,
            Self::ResetPassword,
        ]
    }

    /// このステージが前提とするステージ
    ///
    /// サインアップ以外はすべて永続化されたサインアップ記録を読む。
    pub fn depends_on(&self) -> &'static [Stage] {
        match self {
            Self::Signup => &[],
            _ => &[Self::Signup],
        }
    }

    /// 実行後にアカウントのパスワードが変わるか
    pub fn mutates_password(&self) -> bool {
        matches!(self, Self::ChangePassword)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s).ok_or_else(|| {
            format!(
                "Invalid stage: '{}'. Valid stages are: {}",
                s,
                Self::all()
                    .iter()
                    .map(|stage| stage.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
    }
}

/// 検証済みのステージ実行順
///
/// 依存先がプランに含まれる場合は、必ず依存元より前に並んでいる。
/// 依存先がプランにない場合は、以前の実行で永続化された状態を使う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuitePlan {
    stages: Vec<Stage>,
}

impl SuitePlan {
    pub fn new(stages: Vec<Stage>) -> SuiteResult<Self> {
        if stages.is_empty() {
            return Err(SuiteError::InvalidPlan("plan has no stages".to_string()));
        }

        for (index, stage) in stages.iter().enumerate() {
            if stages[..index].contains(stage) {
                return Err(SuiteError::InvalidPlan(format!(
                    "stage `{}` is listed more than once",
                    stage
                )));
            }

            for dependency in stage.depends_on() {
                if stages[index + 1..].contains(dependency) {
                    return Err(SuiteError::InvalidPlan(format!(
                        "stage `{}` is listed before its dependency `{}`",
                        stage, dependency
                    )));
                }
            }
        }

        Ok(Self { stages })
    }

    /// カンマ区切りのステージ名からプランを作成
    pub fn parse(raw: &str) -> SuiteResult<Self> {
        let stages = raw
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| name.parse::<Stage>().map_err(SuiteError::InvalidPlan))
            .collect::<SuiteResult<Vec<_>>>()?;

        Self::new(stages)
    }

    pub fn full() -> Self {
        Self {
            stages: Stage::all(),
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn contains(&self, stage: Stage) -> bool {
        self.stages.contains(&stage)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
