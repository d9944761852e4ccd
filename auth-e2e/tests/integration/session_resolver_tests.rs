// tests/integration/session_resolver_tests.rs

use auth_e2e::config::FallbackPolicy;
use auth_e2e::domain::user_type::UserType;
use auth_e2e::shared::constants::{endpoints, passwords};
use auth_e2e::{
    CredentialStore, FileCredentialStore, InMemoryCredentialStore, PasswordTier, SessionResolver,
    SuiteConfig, SuiteError,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::fixtures::{self, TEST_EMAIL, TEST_TOKEN};
use crate::common::mock_server::{client_for, config_for, config_with_policy, request_count};
use crate::common::mock_store::CountingCredentialStore;
use crate::common::init_test_env;

fn resolver(config: &SuiteConfig, store: Arc<dyn CredentialStore>) -> SessionResolver {
    SessionResolver::new(config, client_for(config), store)
}

async fn mount_login(server: &MockServer, password: &str, response: ResponseTemplate, times: u64) {
    Mock::given(method("POST"))
        .and(path(format!("/{}", endpoints::LOGIN)))
        .and(body_partial_json(json!({ "email": TEST_EMAIL, "password": password })))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_primary_password_resolves_session() {
    init_test_env();
    let server = MockServer::start().await;
    mount_login(
        &server,
        passwords::VALID,
        ResponseTemplate::new(200).set_body_json(fixtures::login_success(TEST_EMAIL)),
        1,
    )
    .await;

    let store = CountingCredentialStore::with_signup_record(fixtures::signup_record());
    let resolver = resolver(&config_for(&server), Arc::new(store.clone()));

    let (session, tier) = resolver.resolve_with_tier().await.unwrap();

    assert_eq!(tier, PasswordTier::Primary);
    assert_eq!(session.token, TEST_TOKEN);
    assert_eq!(session.email, TEST_EMAIL);
    assert_eq!(session.user_type, UserType::Customer);
    assert_eq!(session.customer_id.as_deref(), Some("cus-1"));
    assert_eq!(store.descriptor_writes(), 1);
    assert_eq!(store.read_session_descriptor().await.unwrap(), session);
}

#[tokio::test]
async fn test_fallback_password_used_after_credential_rejection() {
    init_test_env();
    let server = MockServer::start().await;
    mount_login(
        &server,
        passwords::VALID,
        ResponseTemplate::new(401).set_body_json(fixtures::invalid_credentials()),
        1,
    )
    .await;
    mount_login(
        &server,
        passwords::VALID_ALT,
        ResponseTemplate::new(200).set_body_json(fixtures::login_success(TEST_EMAIL)),
        1,
    )
    .await;

    let store = InMemoryCredentialStore::with_signup_record(fixtures::signup_record());
    let resolver = resolver(&config_for(&server), Arc::new(store.clone()));

    let (session, tier) = resolver.resolve_with_tier().await.unwrap();

    assert_eq!(tier, PasswordTier::Fallback);
    assert_eq!(session.email, TEST_EMAIL);
    assert!(store.has_session_descriptor().await);
}

#[tokio::test]
async fn test_both_passwords_rejected_is_exhausted() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/{}", endpoints::LOGIN)))
        .respond_with(ResponseTemplate::new(401).set_body_json(fixtures::invalid_credentials()))
        .expect(2)
        .mount(&server)
        .await;

    let store = InMemoryCredentialStore::with_signup_record(fixtures::signup_record());
    let resolver = resolver(&config_for(&server), Arc::new(store.clone()));

    let err = resolver.resolve_session().await.unwrap_err();

    match &err {
        SuiteError::AuthenticationExhausted {
            email,
            primary_password,
            fallback_password,
            fallback_status,
            response,
            ..
        } => {
            assert_eq!(email, TEST_EMAIL);
            assert_eq!(primary_password, passwords::VALID);
            assert_eq!(fallback_password, passwords::VALID_ALT);
            assert_eq!(fallback_status.as_u16(), 401);
            assert!(response.contains("Invalid email or password"));
        }
        other => panic!("expected AuthenticationExhausted, got {:?}", other),
    }
    let message = err.to_string();
    assert!(message.contains(TEST_EMAIL));
    assert!(message.contains(passwords::VALID));
    assert!(message.contains(passwords::VALID_ALT));
    assert!(!store.has_session_descriptor().await);
}

#[tokio::test]
async fn test_missing_signup_record_makes_no_request() {
    init_test_env();
    let server = MockServer::start().await;
    let resolver = resolver(&config_for(&server), Arc::new(InMemoryCredentialStore::new()));

    let err = resolver.resolve_session().await.unwrap_err();

    assert!(err.is_setup_order());
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_server_error_does_not_trigger_fallback() {
    init_test_env();
    let server = MockServer::start().await;
    mount_login(
        &server,
        passwords::VALID,
        ResponseTemplate::new(500).set_body_string("upstream exploded"),
        1,
    )
    .await;
    mount_login(
        &server,
        passwords::VALID_ALT,
        ResponseTemplate::new(200).set_body_json(fixtures::login_success(TEST_EMAIL)),
        0,
    )
    .await;

    let store = InMemoryCredentialStore::with_signup_record(fixtures::signup_record());
    let resolver = resolver(&config_for(&server), Arc::new(store.clone()));

    let err = resolver.resolve_session().await.unwrap_err();

    assert!(err.is_transient(), "got {:?}", err);
    assert!(!store.has_session_descriptor().await);
}

#[tokio::test]
async fn test_forbidden_primary_is_unexpected_status() {
    init_test_env();
    let server = MockServer::start().await;
    mount_login(
        &server,
        passwords::VALID,
        ResponseTemplate::new(403).set_body_json(fixtures::error_body("Account locked")),
        1,
    )
    .await;

    let store = InMemoryCredentialStore::with_signup_record(fixtures::signup_record());
    let resolver = resolver(&config_for(&server), Arc::new(store));

    let err = resolver.resolve_session().await.unwrap_err();

    assert!(matches!(
        err,
        SuiteError::UnexpectedStatus { status, .. } if status.as_u16() == 403
    ));
}

#[tokio::test]
async fn test_any_failure_policy_falls_back_on_forbidden() {
    init_test_env();
    let server = MockServer::start().await;
    mount_login(
        &server,
        passwords::VALID,
        ResponseTemplate::new(403).set_body_json(fixtures::error_body("Account locked")),
        1,
    )
    .await;
    mount_login(
        &server,
        passwords::VALID_ALT,
        ResponseTemplate::new(200).set_body_json(fixtures::login_success(TEST_EMAIL)),
        1,
    )
    .await;

    let config = config_with_policy(&server, FallbackPolicy::AnyFailure);
    let store = InMemoryCredentialStore::with_signup_record(fixtures::signup_record());
    let resolver = resolver(&config, Arc::new(store));

    let (_, tier) = resolver.resolve_with_tier().await.unwrap();
    assert_eq!(tier, PasswordTier::Fallback);
}

#[tokio::test]
async fn test_login_without_data_is_transient() {
    init_test_env();
    let server = MockServer::start().await;
    mount_login(
        &server,
        passwords::VALID,
        ResponseTemplate::new(200).set_body_json(json!({ "message": "User logged in successfully" })),
        1,
    )
    .await;

    let store = InMemoryCredentialStore::with_signup_record(fixtures::signup_record());
    let resolver = resolver(&config_for(&server), Arc::new(store.clone()));

    let err = resolver.resolve_session().await.unwrap_err();

    assert!(err.is_transient(), "got {:?}", err);
    assert!(!store.has_session_descriptor().await);
}

#[tokio::test]
async fn test_slow_login_times_out_as_transient() {
    init_test_env();
    let server = MockServer::start().await;
    mount_login(
        &server,
        passwords::VALID,
        ResponseTemplate::new(200)
            .set_body_json(fixtures::login_success(TEST_EMAIL))
            .set_delay(Duration::from_millis(500)),
        1,
    )
    .await;

    let config = crate::common::mock_server::config_with_timeout(&server, Duration::from_millis(50));
    let store = InMemoryCredentialStore::with_signup_record(fixtures::signup_record());
    let resolver = resolver(&config, Arc::new(store));

    let err = resolver.resolve_session().await.unwrap_err();
    assert!(err.is_transient(), "got {:?}", err);
}

#[tokio::test]
async fn test_file_store_shares_record_between_runs() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/{}", endpoints::LOGIN)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(fixtures::login_success(TEST_EMAIL)),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server);

    // 別の実行がサインアップ記録を書き込んだ状態を再現
    FileCredentialStore::new(dir.path())
        .write_signup_record(&fixtures::signup_record())
        .await
        .unwrap();

    let store = FileCredentialStore::new(dir.path());
    let session = resolver(&config, Arc::new(store.clone()))
        .resolve_session()
        .await
        .unwrap();

    assert!(store.session_descriptor_path().exists());
    let reread = FileCredentialStore::new(dir.path())
        .read_session_descriptor()
        .await
        .unwrap();
    assert_eq!(reread, session);
}
