// auth-e2e/src/domain/session_descriptor.rs

use serde::{Deserialize, Serialize};

use super::user_type::UserType;
use crate::api::dto::auth_dto::LoginData;

/// 認証済みセッションの正規化された表現
///
/// ロール別IDはログインレスポンスに該当ロールのオブジェクトがある場合のみ設定されます。
/// 有効期限は追跡しません。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDescriptor {
    pub token: String,
    pub email: String,
    pub user_id: String,
    pub user_type: UserType,
    pub full_name: String,
    pub phone: Option<String>,
    pub merchant_id: Option<String>,
    pub customer_id: Option<String>,
    pub driver_id: Option<String>,
    pub team_id: Option<String>,
}

impl SessionDescriptor {
    /// ログインレスポンスから記述子を組み立てる
    ///
    /// レスポンスにユーザー種別が含まれない場合は `requested` を使う。
    /// ロール別オブジェクトの欠落はエラーにしない。
    pub fn from_login(data: LoginData, requested: UserType) -> Self {
        let user = data.user;

        Self {
            token: data.token,
            email: user.email,
            user_id: user.user_id,
            user_type: user.user_type.unwrap_or(requested),
            full_name: user.full_name,
            phone: user.phone_number,
            merchant_id: user.merchant.and_then(|m| m.merchant_id),
            customer_id: user.customer.and_then(|c| c.customer_id),
            driver_id: user.driver.and_then(|d| d.driver_id),
            team_id: user.merchant_team.and_then(|t| t.team_id),
        }
    }

    pub fn bearer(&self) -> &str {
        &self.token
    }
}
