// src/suite/flows/login.rs

use reqwest::StatusCode;

use crate::api::dto::auth_dto::LoginRequest;
use crate::domain::user_type::UserType;
use crate::error::SuiteResult;
use crate::shared::constants::passwords;
use crate::suite::check::{ensure, expect_eq, expect_message_matches, expect_status};
use crate::suite::runner::{StageContext, StageOutcome};
use crate::test_data::TestDataFactory;
use crate::utils::validation::{is_well_formed_token, INVALID_CREDENTIALS_REGEX};

pub async fn run(ctx: &StageContext) -> SuiteResult<StageOutcome> {
    let record = ctx.store.read_signup_record().await?;

    let session = ctx.resolver.resolve_session().await?;
    expect_eq(
        session.email.as_str(),
        record.email.as_str(),
        "email",
        "session resolution",
    )?;
    ensure(
        is_well_formed_token(&session.token),
        "session resolution",
        "token is not three dot-separated segments",
    )?;

    let wrong = LoginRequest::new(&record.email, passwords::WRONG, record.user_type);
    let reply = ctx.client.login(&wrong).await?;
    expect_status(&reply, StatusCode::UNAUTHORIZED, "wrong password login")?;
    expect_message_matches(&reply, &INVALID_CREDENTIALS_REGEX, "wrong password login")?;

    let merchant = ctx
        .client
        .create_authenticated_user(&TestDataFactory::generate_merchant())
        .await?;
    ensure(
        merchant.merchant_id.is_some(),
        "merchant login",
        "login response carries no merchant id",
    )?;

    let driver = ctx
        .client
        .create_authenticated_user(&TestDataFactory::generate_driver())
        .await?;
    expect_eq(driver.user_type, UserType::Driver, "userType", "driver login")?;
    ensure(
        driver.driver_id.is_some(),
        "driver login",
        "login response carries no driver id",
    )?;

    Ok(StageOutcome::Passed)
}
