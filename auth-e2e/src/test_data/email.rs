// src/test_data/email.rs

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;

pub const EMAIL_DOMAIN: &str = "@yopmail.com";

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bob", "Charlie", "Diana", "Eve", "Frank", "Grace", "Henry", "Ivy", "Jack", "Kate",
    "Liam", "Mia", "Noah", "Olivia", "Paul", "Quinn", "Rose", "Sam", "Tara", "Uma", "Victor",
    "Wendy", "Xander", "Yara", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Wilson", "Anderson", "Thomas", "Taylor", "Moore",
    "Jackson", "Martin", "Lee",
];

/// 形式として不正なメールアドレス
pub const INVALID_EMAILS: &[&str] = &[
    "invalid-email",
    "missing-at-sign.com",
    "@no-local-part.com",
    "no-domain@",
    "spaces in@email.com",
    "double@@at.com",
    "<script>alert(\"xss\")</script>@test.com",
    "test@test.com' OR '1'='1",
];

pub fn random_first_name() -> &'static str {
    FIRST_NAMES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("Alice")
}

pub fn random_last_name() -> &'static str {
    LAST_NAMES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("Smith")
}

/// `{名前}{乱数}{現在時刻ミリ秒の下4桁}@yopmail.com`
pub fn random_email(first_name: &str) -> String {
    let random_num = rand::thread_rng().gen_range(0..10_000);
    let millis = Utc::now().timestamp_millis().to_string();
    let suffix = &millis[millis.len().saturating_sub(4)..];

    format!(
        "{}{}{}{}",
        first_name.to_lowercase(),
        random_num,
        suffix,
        EMAIL_DOMAIN
    )
}

/// 接頭辞付きのメールアドレス（タイムスタンプ入り）
pub fn email_with_prefix(prefix: &str) -> String {
    let random = rand::thread_rng().gen_range(0..1_000);
    format!(
        "{}{}{}{}",
        prefix,
        Utc::now().timestamp_millis(),
        random,
        EMAIL_DOMAIN
    )
}

pub fn invalid_email() -> &'static str {
    INVALID_EMAILS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("invalid-email")
}
