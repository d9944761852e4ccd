// src/suite/flows/account.rs

use reqwest::StatusCode;
use serde_json::json;

use crate::api::dto::auth_dto::{
    LoginData, LoginRequest, RolesData, SwitchAccountData, SwitchAccountRequest,
};
use crate::config::TestAccount;
use crate::domain::user_type::UserType;
use crate::error::SuiteResult;
use crate::shared::constants::{endpoints, messages};
use crate::suite::check::{
    ensure, expect_detail, expect_eq, expect_message, expect_status, expect_status_in,
};
use crate::suite::runner::{StageContext, StageOutcome};
use crate::test_data::email::email_with_prefix;

pub async fn role_check(ctx: &StageContext) -> SuiteResult<StageOutcome> {
    let record = ctx.store.read_signup_record().await?;

    let reply = ctx.client.check_roles(&record.email).await?;
    expect_status(&reply, StatusCode::OK, "known email role check")?;
    expect_message(&reply, messages::USER_CHECK_SUCCESS, "known email role check")?;
    let data: RolesData = reply.data("role check")?;
    ensure(
        !data.roles.is_null(),
        "known email role check",
        "response carries no roles",
    )?;

    let reply = ctx
        .client
        .check_roles(&email_with_prefix("nonexistent"))
        .await?;
    expect_status(&reply, StatusCode::NOT_FOUND, "unknown email role check")?;
    expect_message(&reply, messages::USER_NOT_FOUND, "unknown email role check")?;

    let reply = ctx.client.check_roles("").await?;
    expect_status(&reply, StatusCode::BAD_REQUEST, "empty email role check")?;
    expect_detail(&reply, messages::EMPTY_EMAIL_DETAIL, "empty email role check")?;

    Ok(StageOutcome::Passed)
}

pub async fn active_user(ctx: &StageContext) -> SuiteResult<StageOutcome> {
    let reply = ctx.client.is_authenticated("").await?;
    expect_status(&reply, StatusCode::UNAUTHORIZED, "unauthenticated active check")?;
    expect_message(&reply, messages::NO_TOKEN, "unauthenticated active check")?;

    let session = ctx.resolver.resolve_session().await?;
    let reply = ctx.client.is_authenticated(session.bearer()).await?;
    expect_status(&reply, StatusCode::OK, "authenticated active check")?;

    Ok(StageOutcome::Passed)
}

pub async fn switch_account(ctx: &StageContext) -> SuiteResult<StageOutcome> {
    let team_ids = &ctx.config.team_ids;
    let to_team = SwitchAccountRequest {
        user_type: UserType::MerchantTeam,
        team_id: Some(team_ids.team_one.clone()),
    };

    let reply = ctx.client.switch_account("", &to_team).await?;
    expect_status(&reply, StatusCode::UNAUTHORIZED, "unauthenticated switch")?;
    expect_message(&reply, messages::NO_TOKEN, "unauthenticated switch")?;

    let session = ctx.resolver.resolve_session().await?;
    let reply = ctx.client.switch_account(session.bearer(), &to_team).await?;
    expect_status_in(
        &reply,
        &[StatusCode::BAD_REQUEST, StatusCode::FORBIDDEN],
        "switch without permission",
    )?;

    let reply = ctx
        .client
        .send_json(
            endpoints::SWITCH_ACCOUNT,
            json!({ "userType": "InvalidRole", "teamId": team_ids.team_one }),
            Some(session.bearer()),
        )
        .await?;
    expect_status(&reply, StatusCode::BAD_REQUEST, "switch to invalid type")?;
    expect_message(&reply, messages::REQUEST_BODY_ERROR, "switch to invalid type")?;

    match &ctx.config.multi_role_account {
        Some(account) => switch_between_roles(ctx, account).await?,
        None => tracing::info!("TEST_MULTI_ROLE_EMAIL not set, skipping multi-role switches"),
    }

    Ok(StageOutcome::Passed)
}

/// チーム1 → チーム2 → 顧客 の順に切り替え、毎回新しいトークンを使う
async fn switch_between_roles(ctx: &StageContext, account: &TestAccount) -> SuiteResult<()> {
    let team_ids = &ctx.config.team_ids;

    let login = LoginRequest::new(&account.email, &account.password, UserType::MerchantTeam)
        .with_team(&team_ids.team_one);
    let reply = ctx.client.login(&login).await?;
    expect_status(&reply, StatusCode::OK, "multi-role team login")?;
    expect_message(&reply, messages::LOGIN_SUCCESS, "multi-role team login")?;
    let mut token = reply.data::<LoginData>("login")?.token;

    let steps = [
        (UserType::MerchantTeam, Some(team_ids.team_two.clone())),
        (UserType::Customer, None),
    ];
    for (user_type, team_id) in steps {
        let scenario = format!("switch to {}", user_type);
        let request = SwitchAccountRequest { user_type, team_id };

        let reply = ctx.client.switch_account(&token, &request).await?;
        expect_status(&reply, StatusCode::OK, &scenario)?;
        let data: SwitchAccountData = reply.data("switch account")?;
        expect_eq(data.active_role, user_type, "activeRole", &scenario)?;
        ensure(!data.token.is_empty(), &scenario, "switch returned no token")?;

        token = data.token;
    }

    Ok(())
}
