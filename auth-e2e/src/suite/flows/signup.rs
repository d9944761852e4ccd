// src/suite/flows/signup.rs

use reqwest::StatusCode;

use crate::api::dto::auth_dto::{SignupData, SignupRequest};
use crate::domain::signup_record::SignupRecord;
use crate::domain::user_type::UserType;
use crate::error::SuiteResult;
use crate::shared::constants::messages;
use crate::suite::check::{
    expect_detail, expect_eq, expect_message, expect_not_status, expect_status, expect_status_in,
};
use crate::suite::runner::{StageContext, StageOutcome};
use crate::test_data::factory::WeakPassword;
use crate::test_data::TestDataFactory;

pub async fn run(ctx: &StageContext) -> SuiteResult<StageOutcome> {
    let customer = TestDataFactory::generate_customer();
    register_customer(ctx, &customer).await?;

    // 同じ内容での再登録は競合
    let reply = ctx.client.signup(&customer).await?;
    expect_status(&reply, StatusCode::CONFLICT, "duplicate signup")?;
    expect_message(&reply, messages::DUPLICATE_CUSTOMER, "duplicate signup")?;

    let invalid = SignupRequest {
        email: "invalidEmailFormat".to_string(),
        ..TestDataFactory::generate_customer()
    };
    let reply = ctx.client.signup(&invalid).await?;
    expect_status(&reply, StatusCode::BAD_REQUEST, "invalid email signup")?;
    expect_detail(&reply, messages::INVALID_EMAIL_DETAIL, "invalid email signup")?;

    reject_invalid_fields(ctx).await?;
    register_driver(ctx).await?;

    Ok(StageOutcome::Passed)
}

/// 不正な入力のサインアップは作成されない
async fn reject_invalid_fields(ctx: &StageContext) -> SuiteResult<()> {
    for kind in WeakPassword::all() {
        let scenario = format!("weak password signup ({:?})", kind);
        let reply = ctx
            .client
            .signup(&TestDataFactory::user_with_weak_password(kind))
            .await?;
        expect_status(&reply, StatusCode::BAD_REQUEST, &scenario)?;
        expect_message(&reply, messages::REQUEST_BODY_ERROR, &scenario)?;
        if let Some(detail) = kind.expected_detail() {
            expect_detail(&reply, detail, &scenario)?;
        }
    }

    let reply = ctx
        .client
        .signup(&TestDataFactory::user_with_invalid_email())
        .await?;
    expect_status(&reply, StatusCode::BAD_REQUEST, "malformed email signup")?;

    // 電話番号の形式はサービス側で検証されない場合がある
    let reply = ctx
        .client
        .signup(&TestDataFactory::user_with_invalid_phone())
        .await?;
    expect_not_status(&reply, StatusCode::CREATED, "invalid phone signup")?;

    let boundary = TestDataFactory::boundary_data();
    let reply = ctx
        .client
        .signup(&SignupRequest {
            username: boundary.min_username,
            ..TestDataFactory::generate_customer()
        })
        .await?;
    expect_status_in(
        &reply,
        &[StatusCode::CREATED, StatusCode::BAD_REQUEST],
        "minimum username signup",
    )?;

    let reply = ctx
        .client
        .signup(&SignupRequest {
            username: boundary.too_long_username,
            ..TestDataFactory::generate_customer()
        })
        .await?;
    expect_status(&reply, StatusCode::BAD_REQUEST, "too long username signup")?;

    Ok(())
}

/// ドライバーとして登録できる（記録は保存しない）
async fn register_driver(ctx: &StageContext) -> SuiteResult<()> {
    const SCENARIO: &str = "driver signup";

    let driver = TestDataFactory::generate_driver();
    let reply = ctx.client.signup(&driver).await?;
    expect_status(&reply, StatusCode::CREATED, SCENARIO)?;
    expect_message(&reply, messages::SIGNUP_SUCCESS, SCENARIO)?;

    let data: SignupData = reply.data("driver signup")?;
    expect_eq(data.user.user.user_type, UserType::Driver, "userType", SCENARIO)?;
    expect_eq(
        data.user.user.email.as_str(),
        driver.email.as_str(),
        "email",
        SCENARIO,
    )?;

    Ok(())
}

/// 顧客を登録し、後続の実行のためにサインアップ記録を保存する
async fn register_customer(ctx: &StageContext, customer: &SignupRequest) -> SuiteResult<()> {
    const SCENARIO: &str = "customer signup";

    let reply = ctx.client.signup(customer).await?;
    expect_status(&reply, StatusCode::CREATED, SCENARIO)?;
    expect_message(&reply, messages::SIGNUP_SUCCESS, SCENARIO)?;

    let data: SignupData = reply.data("signup")?;
    let created = &data.user.user;
    expect_eq(created.email.as_str(), customer.email.as_str(), "email", SCENARIO)?;
    expect_eq(
        created.username.as_str(),
        customer.username.as_str(),
        "username",
        SCENARIO,
    )?;
    expect_eq(
        created.full_name.as_str(),
        customer.full_name.as_str(),
        "fullName",
        SCENARIO,
    )?;
    expect_eq(
        created.phone_number.as_str(),
        customer.phone_number.as_str(),
        "phoneNumber",
        SCENARIO,
    )?;
    expect_eq(created.user_type, UserType::Customer, "userType", SCENARIO)?;

    let record = SignupRecord::from_signup(&data, &customer.password);
    ctx.store.write_signup_record(&record).await?;

    tracing::info!("Signup record saved for {}", record.email);
    Ok(())
}
