// src/test_data/factory.rs

use rand::Rng;

use super::{email, phone};
use crate::api::dto::auth_dto::SignupRequest;
use crate::domain::user_type::UserType;
use crate::shared::constants::{messages, passwords};

/// 弱いパスワードの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeakPassword {
    TooShort,
    NoSpecial,
    NoNumber,
    NoUppercase,
    Empty,
}

impl WeakPassword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TooShort => passwords::TOO_SHORT,
            Self::NoSpecial => passwords::NO_SPECIAL,
            Self::NoNumber => passwords::NO_NUMBER,
            Self::NoUppercase => passwords::NO_UPPERCASE,
            Self::Empty => "",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::TooShort,
            Self::NoSpecial,
            Self::NoNumber,
            Self::NoUppercase,
            Self::Empty,
        ]
    }

    /// 拒否時に返る最初の検証メッセージ（空パスワードは詳細を確認しない）
    pub fn expected_detail(&self) -> Option<&'static str> {
        match self {
            Self::TooShort => Some(messages::PASSWORD_TOO_SHORT_DETAIL),
            Self::NoSpecial | Self::NoNumber | Self::NoUppercase => {
                Some(messages::PASSWORD_RULES_DETAIL)
            }
            Self::Empty => None,
        }
    }
}

/// ユーザー名の長さの境界値
#[derive(Debug, Clone)]
pub struct BoundaryData {
    pub min_username: String,
    pub too_long_username: String,
}

/// サインアップ用テストデータの生成
pub struct TestDataFactory;

impl TestDataFactory {
    /// ランダムな顧客を生成
    pub fn generate_customer() -> SignupRequest {
        let first_name = email::random_first_name();
        let last_name = email::random_last_name();

        SignupRequest {
            username: first_name.to_lowercase(),
            email: email::random_email(first_name),
            password: passwords::VALID.to_string(),
            full_name: format!("{} {}", first_name, last_name),
            phone_number: phone::random_mobile_number(),
            user_type: UserType::Customer,
            business_name: None,
            vehicle_number: None,
            team_id: None,
        }
    }

    pub fn generate_merchant() -> SignupRequest {
        let customer = Self::generate_customer();
        SignupRequest {
            user_type: UserType::Merchant,
            business_name: Some(format!("{}'s Business", customer.full_name)),
            ..customer
        }
    }

    pub fn generate_driver() -> SignupRequest {
        SignupRequest {
            user_type: UserType::Driver,
            vehicle_number: Some(Self::generate_vehicle_number()),
            ..Self::generate_customer()
        }
    }

    pub fn user_with_invalid_email() -> SignupRequest {
        SignupRequest {
            email: email::invalid_email().to_string(),
            ..Self::generate_customer()
        }
    }

    pub fn user_with_invalid_phone() -> SignupRequest {
        SignupRequest {
            phone_number: phone::invalid_phone_number().to_string(),
            ..Self::generate_customer()
        }
    }

    pub fn user_with_weak_password(kind: WeakPassword) -> SignupRequest {
        SignupRequest {
            password: kind.as_str().to_string(),
            ..Self::generate_customer()
        }
    }

    /// 英国の車両登録番号（例: `AB12 CDE`）
    pub fn generate_vehicle_number() -> String {
        let mut rng = rand::thread_rng();
        let mut letter = || char::from(b'A' + rng.gen_range(0..26u8));
        let area: String = (0..2).map(|_| letter()).collect();
        let random: String = (0..3).map(|_| letter()).collect();
        let age = rand::thread_rng().gen_range(0..100u8);

        format!("{}{:02} {}", area, age, random)
    }

    pub fn boundary_data() -> BoundaryData {
        BoundaryData {
            min_username: "abc".to_string(),
            too_long_username: "a".repeat(51),
        }
    }
}
