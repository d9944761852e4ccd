// auth-e2e/src/api/dto/auth_dto.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::user_type::UserType;
use crate::types::opaque_id;

// --- リクエストDTO ---

/// ユーザー登録リクエスト
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone_number: String,
    pub user_type: UserType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

/// ログインリクエスト
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub user_type: UserType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

impl LoginRequest {
    pub fn new(email: &str, password: &str, user_type: UserType) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            user_type,
            team_id: None,
        }
    }

    pub fn with_team(mut self, team_id: &str) -> Self {
        self.team_id = Some(team_id.to_string());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolesRequest {
    pub email: String,
}

/// アカウント種別の切り替えリクエスト
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchAccountRequest {
    pub user_type: UserType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

/// OTPの用途
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerificationType {
    Signup,
    Login,
    ForgotPassword,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailOtpRequest {
    pub email: String,
    pub verification_type: VerificationType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendSmsOtpRequest {
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPhoneRequest {
    pub phone_number: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewOtpRequest {
    pub identifier: String,
}

/// パスワード変更リクエスト（要認証）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub user_id: String,
    pub old_password: String,
    pub new_password: String,
}

/// パスワードリセットリクエスト（メールまたは電話番号で本人特定）
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub new_password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

// --- レスポンスDTO ---

/// サインアップ成功時の `data`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupData {
    pub user: SignupBundle,
}

/// 作成されたユーザーと、種別ごとのプロフィール
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupBundle {
    pub user: CreatedUser,
    #[serde(default)]
    pub customer: Option<CustomerPayload>,
    #[serde(default)]
    pub merchant: Option<MerchantPayload>,
    #[serde(default)]
    pub driver: Option<DriverPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUser {
    /// システム内部ID
    #[serde(deserialize_with = "opaque_id::deserialize")]
    pub id: String,
    #[serde(deserialize_with = "opaque_id::deserialize")]
    pub user_id: String,
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub user_type: UserType,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub user_roles: Option<Vec<UserRole>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRole {
    #[serde(rename = "type")]
    pub role_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    #[serde(default, deserialize_with = "opaque_id::deserialize_option")]
    pub customer_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantPayload {
    #[serde(default, deserialize_with = "opaque_id::deserialize_option")]
    pub merchant_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverPayload {
    #[serde(default, deserialize_with = "opaque_id::deserialize_option")]
    pub driver_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantTeamPayload {
    #[serde(default, deserialize_with = "opaque_id::deserialize_option")]
    pub team_id: Option<String>,
}

/// ログイン成功時の `data`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub user: LoginUser,
}

/// ログインレスポンスのユーザー情報
///
/// ロール別のオブジェクトは該当するロールを持つ場合のみ含まれます。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    #[serde(deserialize_with = "opaque_id::deserialize")]
    pub user_id: String,
    pub email: String,
    #[serde(default)]
    pub user_type: Option<UserType>,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub merchant: Option<MerchantPayload>,
    #[serde(default)]
    pub customer: Option<CustomerPayload>,
    #[serde(default)]
    pub driver: Option<DriverPayload>,
    #[serde(default)]
    pub merchant_team: Option<MerchantTeamPayload>,
}

/// ロール確認の `data`（ロールの形式はサービス側に依存）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolesData {
    #[serde(default)]
    pub roles: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchAccountData {
    pub active_role: UserType,
    pub token: String,
}
