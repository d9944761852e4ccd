//! 文字列・数値どちらでも返ってくる識別子のデシリアライズ
//!
//! サービスは同じ識別子を文字列で返すことも数値で返すこともあるため、
//! どちらも不透明な文字列として受け取ります。空文字は未設定として扱います。

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a string or numeric id, got {}",
            other
        ))),
    }
}

pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a string or numeric id, got {}",
            other
        ))),
    }
}
