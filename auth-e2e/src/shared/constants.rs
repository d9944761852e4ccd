// src/shared/constants.rs

//! スイート全体で使う定数
//!
//! エンドポイント、パスワードパターン、期待メッセージを一箇所で管理します。

/// 永続化ファイルのデフォルト保存先
pub const DEFAULT_STORE_DIR: &str = "test-data";

/// サインアップ記録のファイル名
pub const SIGNUP_RECORD_FILE: &str = "customerSignupData.json";

/// セッション記述子のファイル名
pub const SESSION_DESCRIPTOR_FILE: &str = "customerAuthData.json";

pub const DEFAULT_TEAM_ONE_ID: &str = "9246583f-96c7-4f06-94a9-da5cdc87ef99";
pub const DEFAULT_TEAM_TWO_ID: &str = "6faf4c2e-56be-43c1-889c-3fdaa9278638";

/// APIエンドポイント（ベースURLからの相対パス）
pub mod endpoints {
    pub const SIGNUP: &str = "auth/signup";
    pub const LOGIN: &str = "auth/login";
    pub const ROLES: &str = "auth/roles";
    pub const IS_AUTHENTICATED: &str = "auth/is-authenticated";
    pub const SEND_OTP_EMAIL: &str = "auth/send-otp-email";
    pub const SEND_OTP_SMS: &str = "auth/send-otp-sms";
    pub const VERIFY_EMAIL: &str = "auth/verify-email";
    pub const VERIFY_PHONE: &str = "auth/verify-phone";
    // テスト環境専用
    pub const VIEW_OTP: &str = "auth/view-Otp";
    pub const CHANGE_PASSWORD: &str = "auth/change-password";
    pub const RESET_PASSWORD: &str = "auth/reset-password";
    pub const SWITCH_ACCOUNT: &str = "auth/switch-account";
}

/// テスト用パスワードパターン
pub mod passwords {
    pub const VALID: &str = "Password1@";
    pub const VALID_ALT: &str = "Password@2";
    pub const NO_SPECIAL: &str = "Password1";
    pub const NO_NUMBER: &str = "Password@";
    pub const NO_UPPERCASE: &str = "password1@";
    pub const TOO_SHORT: &str = "Pass1@";
    pub const WRONG: &str = "WrongPassword@123";
}

/// サービスが返すメッセージ
pub mod messages {
    pub const SIGNUP_SUCCESS: &str = "User created successfully";
    pub const LOGIN_SUCCESS: &str = "User logged in successfully";
    pub const USER_CHECK_SUCCESS: &str = "User check successful";
    pub const OTP_VERIFIED: &str = "OTP Verification was successful";
    pub const PASSWORD_UPDATED: &str = "Password updated successfully";
    pub const OLD_PASSWORD_INCORRECT: &str = "The old password you entered is incorrect.";
    pub const NO_TOKEN: &str = "No token provided";
    pub const REQUEST_BODY_ERROR: &str = "Error in request body";
    pub const DUPLICATE_CUSTOMER: &str = "Customer with this email or phone already exists";
    pub const USER_NOT_FOUND: &str = "User not found or does not exist";
    pub const RESET_USER_NOT_FOUND: &str = "User not found.";
    pub const INVALID_EMAIL_DETAIL: &str = "\"email\" must be a valid email";
    pub const INVALID_USER_ID_DETAIL: &str = "\"userId\" must be a valid GUID";
    pub const EMPTY_EMAIL_DETAIL: &str = "\"email\" is not allowed to be empty";
    pub const EMPTY_PHONE_DETAIL: &str = "\"phoneNumber\" is not allowed to be empty";
    pub const EMPTY_OTP_DETAIL: &str = "\"otp\" is not allowed to be empty";
    pub const EMPTY_CODE_DETAIL: &str = "\"code\" is not allowed to be empty";
    pub const PASSWORD_TOO_SHORT_DETAIL: &str =
        "\"password\" length must be at least 8 characters long";
    pub const PASSWORD_RULES_DETAIL: &str = "Password must contain at least one uppercase letter, \
         one lowercase letter, one number and one special character";
    pub const PASSWORD_RECENTLY_USED: &str =
        "This password has been used recently. Please choose a different one.";
    pub const VERIFICATION_TYPE_DETAIL: &str =
        "\"verificationType\" must be one of [signup, login, forgotPassword]";
}
