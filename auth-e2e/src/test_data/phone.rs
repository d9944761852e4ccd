// src/test_data/phone.rs

use rand::seq::SliceRandom;
use rand::Rng;

/// 英国の電話番号として不正な値
pub const INVALID_PHONE_NUMBERS: &[&str] = &[
    "070abc",
    "12345",
    "07",
    "999999999999999",
    "+44 7700 900000",
];

/// 形式は正しいが登録されていない番号
pub const UNREGISTERED_NUMBER: &str = "09011111111";

fn random_digits(count: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// 英国の携帯番号（`07` + 9桁）
pub fn random_mobile_number() -> String {
    format!("07{}", random_digits(9))
}

pub fn invalid_phone_number() -> &'static str {
    INVALID_PHONE_NUMBERS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("070abc")
}
