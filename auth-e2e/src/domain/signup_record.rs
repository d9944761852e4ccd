// auth-e2e/src/domain/signup_record.rs

use serde::{Deserialize, Serialize};

use super::user_type::UserType;
use crate::api::dto::auth_dto::SignupData;

/// サインアップ時に確定した資格情報
///
/// 後続の独立した実行がセッションを再構築するための唯一の入力です。
/// ストアには常に最新の1件だけが保存されます。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRecord {
    pub user_id: String,
    pub system_id: String,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub phone_number: String,
    /// 古いレコードに存在しない場合は Customer とみなす
    #[serde(default)]
    pub user_type: UserType,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    /// サインアップに使った平文パスワード
    pub password: String,
    #[serde(default)]
    pub customer_id: Option<String>,
}

impl SignupRecord {
    /// サインアップレスポンスと送信したパスワードからレコードを作成
    pub fn from_signup(data: &SignupData, password: &str) -> Self {
        let created = &data.user.user;

        Self {
            user_id: created.user_id.clone(),
            system_id: created.id.clone(),
            email: created.email.clone(),
            username: created.username.clone(),
            full_name: created.full_name.clone(),
            phone_number: created.phone_number.clone(),
            user_type: created.user_type,
            account_type: created.account_type.clone(),
            roles: created
                .user_roles
                .iter()
                .flatten()
                .map(|role| role.role_type.clone())
                .collect(),
            password: password.to_string(),
            customer_id: data
                .user
                .customer
                .as_ref()
                .and_then(|customer| customer.customer_id.clone()),
        }
    }
}
