use once_cell::sync::Lazy;
use regex::Regex;

/// ベアラートークン用正規表現（ドット区切りの3セグメント）
pub static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+$").expect("Invalid token regex")
});

/// 英国の電話番号用正規表現（0始まりの11桁）
pub static UK_PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0[0-9]{10}$").expect("Invalid phone regex"));

/// OTP送信成功メッセージ（大文字小文字を区別しない）
pub static OTP_SENT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)otp sent|code sent").expect("Invalid otp message regex"));

/// 認証失敗メッセージ
pub static INVALID_CREDENTIALS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)invalid|incorrect|wrong").expect("Invalid credentials message regex")
});

pub fn is_well_formed_token(token: &str) -> bool {
    TOKEN_REGEX.is_match(token)
}

/// 空白とハイフンを除いてから英国の電話番号形式か判定
pub fn is_valid_uk_phone(phone: &str) -> bool {
    let cleaned: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    UK_PHONE_REGEX.is_match(&cleaned)
}
