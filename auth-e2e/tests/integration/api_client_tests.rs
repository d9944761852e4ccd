// tests/integration/api_client_tests.rs

use auth_e2e::api::dto::auth_dto::{SendEmailOtpRequest, VerificationType};
use auth_e2e::api::AuthApiClient;
use auth_e2e::domain::user_type::UserType;
use auth_e2e::shared::constants::{endpoints, messages};
use auth_e2e::test_data::TestDataFactory;
use auth_e2e::{SuiteConfig, SuiteError};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::fixtures::{self, TEST_TOKEN};
use crate::common::init_test_env;
use crate::common::mock_server::{client_for, config_for, request_count, route};

#[tokio::test]
async fn test_bearer_and_request_id_headers_are_sent() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(route(endpoints::IS_AUTHENTICATED)))
        .and(header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .and(header_exists("x-request-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&config_for(&server));
    let reply = client.is_authenticated(TEST_TOKEN).await.unwrap();

    assert_eq!(reply.status, StatusCode::OK);
}

#[tokio::test]
async fn test_empty_bearer_is_still_sent() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(route(endpoints::IS_AUTHENTICATED)))
        .and(header_exists("authorization"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(fixtures::error_body(messages::NO_TOKEN)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&config_for(&server));
    let reply = client.is_authenticated("").await.unwrap();

    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.message(), Some(messages::NO_TOKEN));
}

#[tokio::test]
async fn test_validation_detail_is_exposed() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(route(endpoints::ROLES)))
        .and(body_partial_json(json!({ "email": "" })))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(fixtures::validation_error(messages::EMPTY_EMAIL_DETAIL)),
        )
        .mount(&server)
        .await;

    let client = client_for(&config_for(&server));
    let reply = client.check_roles("").await.unwrap();

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.message(), Some(messages::REQUEST_BODY_ERROR));
    assert_eq!(reply.first_detail(), Some(messages::EMPTY_EMAIL_DETAIL));
}

#[tokio::test]
async fn test_fire_and_collect_returns_every_reply() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(route(endpoints::SEND_OTP_EMAIL)))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(fixtures::error_body("OTP sent successfully")),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(route(endpoints::SEND_OTP_EMAIL)))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(fixtures::error_body("Too many requests")),
        )
        .mount(&server)
        .await;

    let client = client_for(&config_for(&server));
    let outcomes = client
        .fire_and_collect(3, |client| async move {
            let request = SendEmailOtpRequest {
                email: "burst@yopmail.com".to_string(),
                verification_type: VerificationType::Signup,
            };
            client.send_otp_email(&request).await
        })
        .await;

    assert_eq!(outcomes.len(), 3);
    let statuses: Vec<u16> = outcomes
        .into_iter()
        .map(|outcome| outcome.unwrap().status.as_u16())
        .collect();
    assert_eq!(statuses.iter().filter(|&&s| s == 201).count(), 1);
    assert_eq!(statuses.iter().filter(|&&s| s == 429).count(), 2);
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn test_view_otp_accepts_string_and_number() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(route(endpoints::VIEW_OTP)))
        .and(body_partial_json(json!({ "identifier": "a@yopmail.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": "012345" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(route(endpoints::VIEW_OTP)))
        .and(body_partial_json(json!({ "identifier": "07123456789" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": 654321 })))
        .mount(&server)
        .await;

    let client = client_for(&config_for(&server));

    assert_eq!(client.view_otp("a@yopmail.com").await.unwrap(), "012345");
    assert_eq!(client.view_otp("07123456789").await.unwrap(), "654321");
}

#[tokio::test]
async fn test_view_otp_failure_is_otp_unavailable() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(route(endpoints::VIEW_OTP)))
        .respond_with(ResponseTemplate::new(404).set_body_json(fixtures::error_body("Not found")))
        .mount(&server)
        .await;

    let client = client_for(&config_for(&server));
    let err = client.view_otp("a@yopmail.com").await.unwrap_err();

    assert!(matches!(err, SuiteError::OtpUnavailable(_)));
}

#[tokio::test]
async fn test_create_authenticated_merchant() {
    init_test_env();
    let server = MockServer::start().await;
    let merchant = TestDataFactory::generate_merchant();

    Mock::given(method("POST"))
        .and(path(route(endpoints::SIGNUP)))
        .and(body_partial_json(json!({ "userType": "Merchant" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": messages::SIGNUP_SUCCESS
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(route(endpoints::LOGIN)))
        .and(body_partial_json(json!({
            "email": merchant.email,
            "password": merchant.password,
            "userType": "Merchant"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::login_success_with(
            &merchant.email,
            "Merchant",
            json!({ "merchant": { "merchantId": 77 } }),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&config_for(&server));
    let session = client.create_authenticated_user(&merchant).await.unwrap();

    assert_eq!(session.user_type, UserType::Merchant);
    assert_eq!(session.email, merchant.email);
    assert_eq!(session.merchant_id.as_deref(), Some("77"));
    assert!(session.customer_id.is_none());
}

#[tokio::test]
async fn test_create_authenticated_user_rejects_conflict() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(route(endpoints::SIGNUP)))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(fixtures::error_body(messages::DUPLICATE_CUSTOMER)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(route(endpoints::LOGIN)))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&config_for(&server));
    let err = client
        .create_authenticated_user(&TestDataFactory::generate_customer())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SuiteError::UnexpectedStatus { status, .. } if status == StatusCode::CONFLICT
    ));
}

#[tokio::test]
async fn test_connection_refused_is_transient() {
    init_test_env();
    // 何も待ち受けていないポート
    let config = SuiteConfig::for_testing("http://127.0.0.1:9/").unwrap();
    let client = AuthApiClient::new(&config).unwrap();

    let err = client.check_roles("a@yopmail.com").await.unwrap_err();

    assert!(err.is_transient(), "got {:?}", err);
}
