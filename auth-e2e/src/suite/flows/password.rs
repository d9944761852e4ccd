// src/suite/flows/password.rs

use reqwest::StatusCode;

use crate::api::dto::auth_dto::{ChangePasswordRequest, ResetPasswordRequest};
use crate::error::SuiteResult;
use crate::service::session_resolver::PasswordTier;
use crate::shared::constants::{messages, passwords};
use crate::suite::check::{expect_detail, expect_message, expect_not_status, expect_status};
use crate::suite::runner::{StageContext, StageOutcome};
use crate::test_data::phone::random_mobile_number;

/// 認証できた段階のパスワードから、フォールバックパスワードへ変更する
///
/// 変更後は次回以降のセッション解決がフォールバックで成功する。
pub async fn change(ctx: &StageContext) -> SuiteResult<StageOutcome> {
    let record = ctx.store.read_signup_record().await?;
    let (session, tier) = ctx.resolver.resolve_with_tier().await?;
    let fallback = ctx.resolver.fallback_password();

    let current = match tier {
        PasswordTier::Primary => record.password.as_str(),
        PasswordTier::Fallback => fallback,
    };
    let request_to = |user_id: &str, old_password: &str, new_password: &str| {
        ChangePasswordRequest {
            user_id: user_id.to_string(),
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        }
    };
    let request =
        |user_id: &str, old_password: &str| request_to(user_id, old_password, fallback);

    let reply = ctx
        .client
        .change_password("", &request(&session.user_id, current))
        .await?;
    expect_status(&reply, StatusCode::UNAUTHORIZED, "unauthenticated change")?;
    expect_message(&reply, messages::NO_TOKEN, "unauthenticated change")?;

    let reply = ctx
        .client
        .change_password(session.bearer(), &request("1234mm", current))
        .await?;
    expect_status(&reply, StatusCode::BAD_REQUEST, "change with invalid user id")?;
    expect_detail(&reply, messages::INVALID_USER_ID_DETAIL, "change with invalid user id")?;

    let reply = ctx
        .client
        .change_password(session.bearer(), &request(&session.user_id, passwords::WRONG))
        .await?;
    expect_status(&reply, StatusCode::FORBIDDEN, "change with wrong old password")?;
    expect_message(&reply, messages::OLD_PASSWORD_INCORRECT, "change with wrong old password")?;

    let reply = ctx
        .client
        .change_password(
            session.bearer(),
            &request_to(&session.user_id, current, passwords::NO_SPECIAL),
        )
        .await?;
    expect_status(&reply, StatusCode::BAD_REQUEST, "change to weak password")?;
    expect_detail(&reply, messages::PASSWORD_RULES_DETAIL, "change to weak password")?;

    let reply = ctx
        .client
        .change_password(
            session.bearer(),
            &request_to(&session.user_id, current, current),
        )
        .await?;
    expect_not_status(&reply, StatusCode::OK, "change to same password")?;
    expect_message(&reply, messages::PASSWORD_RECENTLY_USED, "change to same password")?;

    if tier == PasswordTier::Fallback || current == fallback {
        tracing::info!(
            "Session for {} already uses the fallback password, skipping the change",
            session.email
        );
        return Ok(StageOutcome::Passed);
    }

    let reply = ctx
        .client
        .change_password(session.bearer(), &request(&session.user_id, current))
        .await?;
    expect_status(&reply, StatusCode::OK, "change password")?;
    expect_message(&reply, messages::PASSWORD_UPDATED, "change password")?;

    tracing::info!("Password for {} changed to the fallback password", session.email);
    Ok(StageOutcome::Passed)
}

pub async fn reset(ctx: &StageContext) -> SuiteResult<StageOutcome> {
    let reply = ctx
        .client
        .reset_password(&ResetPasswordRequest {
            new_password: passwords::VALID.to_string(),
            email: Some(String::new()),
            ..Default::default()
        })
        .await?;
    expect_not_status(&reply, StatusCode::OK, "reset without email")?;
    expect_detail(&reply, messages::INVALID_EMAIL_DETAIL, "reset without email")?;

    let reply = ctx
        .client
        .reset_password(&ResetPasswordRequest {
            new_password: passwords::VALID.to_string(),
            phone_number: Some(String::new()),
            ..Default::default()
        })
        .await?;
    expect_status(&reply, StatusCode::BAD_REQUEST, "reset without phone")?;
    expect_detail(&reply, messages::EMPTY_PHONE_DETAIL, "reset without phone")?;

    let reply = ctx
        .client
        .reset_password(&ResetPasswordRequest {
            new_password: passwords::VALID.to_string(),
            phone_number: Some(random_mobile_number()),
            ..Default::default()
        })
        .await?;
    expect_status(&reply, StatusCode::NOT_FOUND, "reset with unknown phone")?;
    expect_message(&reply, messages::RESET_USER_NOT_FOUND, "reset with unknown phone")?;

    Ok(StageOutcome::Passed)
}
