// auth-e2e/src/domain/user_type.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// サービスが認識するユーザー種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UserType {
    #[default]
    Customer,
    Merchant,
    Driver,
    MerchantTeam,
    Admin,
}

impl UserType {
    /// 文字列からUserTypeに変換（ワイヤ表記と完全一致のみ）
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Customer" => Some(Self::Customer),
            "Merchant" => Some(Self::Merchant),
            "Driver" => Some(Self::Driver),
            "MerchantTeam" => Some(Self::MerchantTeam),
            "Admin" => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Merchant => "Merchant",
            Self::Driver => "Driver",
            Self::MerchantTeam => "MerchantTeam",
            Self::Admin => "Admin",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::Customer,
            Self::Merchant,
            Self::Driver,
            Self::MerchantTeam,
            Self::Admin,
        ]
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s).ok_or_else(|| {
            format!(
                "Invalid user type: '{}'. Valid types are: {}",
                s,
                Self::all()
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
    }
}
