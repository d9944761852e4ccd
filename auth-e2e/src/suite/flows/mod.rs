// src/suite/flows/mod.rs

mod account;
mod login;
mod otp;
mod password;
mod signup;

use super::runner::{StageContext, StageOutcome};
use super::stage::Stage;
use crate::error::SuiteResult;

/// 同一リクエストのバースト件数（レート制限の確認用）
pub const RATE_LIMIT_BURST: usize = 3;

pub async fn run_stage(stage: Stage, ctx: &StageContext) -> SuiteResult<StageOutcome> {
    match stage {
        Stage::Signup => signup::run(ctx).await,
        Stage::Login => login::run(ctx).await,
        Stage::RoleCheck => account::role_check(ctx).await,
        Stage::ActiveUser => account::active_user(ctx).await,
        Stage::SwitchAccount => account::switch_account(ctx).await,
        Stage::SendEmailOtp => otp::send_email(ctx).await,
        Stage::SendSmsOtp => otp::send_sms(ctx).await,
        Stage::VerifyEmailOtp => otp::verify_email(ctx).await,
        Stage::VerifySmsOtp => otp::verify_sms(ctx).await,
        Stage::ChangePassword => password::change(ctx).await,
        Stage::ResetPassword => password::reset(ctx).await,
    }
}
