use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SuiteError, SuiteResult};

/// サービスのレスポンスエンベロープ `{ message, data, details }`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApiEnvelope<T> {
    pub message: Option<String>,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ErrorDetail>>,
}

/// バリデーションエラーの詳細
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorDetail {
    pub message: String,
}

/// 受信したHTTPレスポンスそのもの
///
/// ステータスと生のボディを保持し、検証は呼び出し側に任せます。
#[derive(Debug, Clone)]
pub struct ApiReply {
    pub status: StatusCode,
    /// JSONとして解釈できなかった場合は `Value::Null`
    pub body: Value,
    pub text: String,
}

impl ApiReply {
    pub fn new(status: StatusCode, text: String) -> Self {
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, body, text }
    }

    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }

    /// `details[0].message`
    pub fn first_detail(&self) -> Option<&str> {
        self.body["details"][0]["message"].as_str()
    }

    pub fn decode<T: DeserializeOwned>(&self, operation: &str) -> SuiteResult<ApiEnvelope<T>> {
        serde_json::from_value(self.body.clone()).map_err(|e| {
            SuiteError::TransientService(format!(
                "malformed {} response: {} (body: {})",
                operation, e, self.text
            ))
        })
    }

    /// `data` を取り出す。欠けていれば不正なレスポンスとして扱う
    pub fn data<T: DeserializeOwned>(&self, operation: &str) -> SuiteResult<T> {
        self.decode::<T>(operation)?.data.ok_or_else(|| {
            SuiteError::TransientService(format!(
                "malformed {} response: missing data (body: {})",
                operation, self.text
            ))
        })
    }
}
