// src/suite/flows/otp.rs

use reqwest::StatusCode;
use serde_json::json;

use super::RATE_LIMIT_BURST;
use crate::api::dto::auth_dto::{
    SendEmailOtpRequest, VerificationType, VerifyEmailRequest, VerifyPhoneRequest,
};
use crate::error::SuiteResult;
use crate::shared::constants::{endpoints, messages};
use crate::suite::check::{
    ensure, expect_detail, expect_message, expect_message_matches, expect_not_status,
    expect_status, expect_status_in,
};
use crate::suite::runner::{StageContext, StageOutcome};
use crate::test_data::phone::UNREGISTERED_NUMBER;
use crate::types::ApiReply;
use crate::utils::validation::OTP_SENT_REGEX;

const SENT: [StatusCode; 2] = [StatusCode::OK, StatusCode::CREATED];

fn signup_otp(email: &str) -> SendEmailOtpRequest {
    SendEmailOtpRequest {
        email: email.to_string(),
        verification_type: VerificationType::Signup,
    }
}

fn expect_sent(reply: &ApiReply, scenario: &str) -> SuiteResult<()> {
    expect_status_in(reply, &SENT, scenario)?;
    expect_message_matches(reply, &OTP_SENT_REGEX, scenario)
}

/// バーストの結果がすべて 201 なら、レート制限が効いていない
fn expect_throttled(outcomes: Vec<SuiteResult<ApiReply>>, scenario: &str) -> SuiteResult<()> {
    let replies = outcomes.into_iter().collect::<SuiteResult<Vec<_>>>()?;
    ensure(
        replies.iter().any(|reply| reply.status != StatusCode::CREATED),
        scenario,
        format!("all {} burst requests returned 201", replies.len()),
    )
}

pub async fn send_email(ctx: &StageContext) -> SuiteResult<StageOutcome> {
    let record = ctx.store.read_signup_record().await?;

    let reply = ctx.client.send_otp_email(&signup_otp("")).await?;
    expect_status(&reply, StatusCode::BAD_REQUEST, "empty email otp")?;
    expect_detail(&reply, messages::EMPTY_EMAIL_DETAIL, "empty email otp")?;

    // 列挙型では空の検証種別を表現できないため、JSONを直接送る
    let reply = ctx
        .client
        .send_json(
            endpoints::SEND_OTP_EMAIL,
            json!({ "email": record.email, "verificationType": "" }),
            None,
        )
        .await?;
    expect_status(&reply, StatusCode::BAD_REQUEST, "empty verification type otp")?;
    expect_detail(
        &reply,
        messages::VERIFICATION_TYPE_DETAIL,
        "empty verification type otp",
    )?;

    let reply = ctx.client.send_otp_email(&signup_otp(&record.email)).await?;
    expect_sent(&reply, "email otp")?;

    let email = record.email.clone();
    let outcomes = ctx
        .client
        .fire_and_collect(RATE_LIMIT_BURST, move |client| {
            let request = signup_otp(&email);
            async move { client.send_otp_email(&request).await }
        })
        .await;
    expect_throttled(outcomes, "email otp burst")?;

    Ok(StageOutcome::Passed)
}

pub async fn send_sms(ctx: &StageContext) -> SuiteResult<StageOutcome> {
    let record = ctx.store.read_signup_record().await?;

    let reply = ctx.client.send_otp_sms("").await?;
    expect_status(&reply, StatusCode::BAD_REQUEST, "empty phone otp")?;
    expect_detail(&reply, messages::EMPTY_PHONE_DETAIL, "empty phone otp")?;

    let reply = ctx.client.send_otp_sms(UNREGISTERED_NUMBER).await?;
    expect_not_status(&reply, StatusCode::CREATED, "unregistered phone otp")?;

    let reply = ctx.client.send_otp_sms(&record.phone_number).await?;
    expect_sent(&reply, "sms otp")?;

    let phone = record.phone_number.clone();
    let outcomes = ctx
        .client
        .fire_and_collect(RATE_LIMIT_BURST, move |client| {
            let phone = phone.clone();
            async move { client.send_otp_sms(&phone).await }
        })
        .await;
    expect_throttled(outcomes, "sms otp burst")?;

    Ok(StageOutcome::Passed)
}

pub async fn verify_email(ctx: &StageContext) -> SuiteResult<StageOutcome> {
    let record = ctx.store.read_signup_record().await?;

    let empty_email = VerifyEmailRequest {
        email: String::new(),
        otp: "123456".to_string(),
    };
    let reply = ctx.client.verify_email(&empty_email).await?;
    expect_status(&reply, StatusCode::BAD_REQUEST, "verify without email")?;
    expect_detail(&reply, messages::EMPTY_EMAIL_DETAIL, "verify without email")?;

    let empty_otp = VerifyEmailRequest {
        email: record.email.clone(),
        otp: String::new(),
    };
    let reply = ctx.client.verify_email(&empty_otp).await?;
    expect_status(&reply, StatusCode::BAD_REQUEST, "verify without otp")?;
    expect_detail(&reply, messages::EMPTY_OTP_DETAIL, "verify without otp")?;

    if !ctx.config.otp_view_allowed() {
        tracing::info!("OTP view endpoint not allowed, skipping email OTP round trip");
        return Ok(StageOutcome::Passed);
    }

    let reply = ctx.client.send_otp_email(&signup_otp(&record.email)).await?;
    expect_sent(&reply, "email otp before verify")?;

    let otp = ctx.client.view_otp(&record.email).await?;
    let reply = ctx
        .client
        .verify_email(&VerifyEmailRequest {
            email: record.email.clone(),
            otp,
        })
        .await?;
    expect_status(&reply, StatusCode::OK, "verify email otp")?;
    expect_message(&reply, messages::OTP_VERIFIED, "verify email otp")?;

    Ok(StageOutcome::Passed)
}

pub async fn verify_sms(ctx: &StageContext) -> SuiteResult<StageOutcome> {
    let record = ctx.store.read_signup_record().await?;

    let empty_phone = VerifyPhoneRequest {
        phone_number: String::new(),
        code: "123456".to_string(),
    };
    let reply = ctx.client.verify_phone(&empty_phone).await?;
    expect_status(&reply, StatusCode::BAD_REQUEST, "verify without phone")?;
    expect_detail(&reply, messages::EMPTY_PHONE_DETAIL, "verify without phone")?;

    let empty_code = VerifyPhoneRequest {
        phone_number: record.phone_number.clone(),
        code: String::new(),
    };
    let reply = ctx.client.verify_phone(&empty_code).await?;
    expect_status(&reply, StatusCode::BAD_REQUEST, "verify without code")?;
    expect_detail(&reply, messages::EMPTY_CODE_DETAIL, "verify without code")?;

    if !ctx.config.otp_view_allowed() {
        tracing::info!("OTP view endpoint not allowed, skipping SMS OTP round trip");
        return Ok(StageOutcome::Passed);
    }

    let reply = ctx.client.send_otp_sms(&record.phone_number).await?;
    expect_sent(&reply, "sms otp before verify")?;

    let code = ctx.client.view_otp(&record.phone_number).await?;
    let reply = ctx
        .client
        .verify_phone(&VerifyPhoneRequest {
            phone_number: record.phone_number.clone(),
            code,
        })
        .await?;
    expect_status(&reply, StatusCode::OK, "verify sms otp")?;
    expect_message(&reply, messages::OTP_VERIFIED, "verify sms otp")?;

    Ok(StageOutcome::Passed)
}
