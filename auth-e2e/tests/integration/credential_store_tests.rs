// tests/integration/credential_store_tests.rs

use auth_e2e::domain::user_type::UserType;
use auth_e2e::shared::constants::{SESSION_DESCRIPTOR_FILE, SIGNUP_RECORD_FILE};
use auth_e2e::{CredentialStore, FileCredentialStore, SessionDescriptor, SuiteError};
use serde_json::Value;

use crate::common::fixtures::{self, TEST_TOKEN};
use crate::common::init_test_env;

fn descriptor(email: &str) -> SessionDescriptor {
    SessionDescriptor {
        token: TEST_TOKEN.to_string(),
        email: email.to_string(),
        user_id: "usr-1".to_string(),
        user_type: UserType::Customer,
        full_name: "Ada Lovelace".to_string(),
        phone: None,
        merchant_id: None,
        customer_id: Some("cus-1".to_string()),
        driver_id: None,
        team_id: None,
    }
}

#[tokio::test]
async fn test_empty_store_reports_setup_order() {
    init_test_env();
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path().join("nested"));

    let err = store.read_signup_record().await.unwrap_err();
    assert!(err.is_setup_order());
    assert!(err.to_string().contains(SIGNUP_RECORD_FILE));

    let err = store.read_session_descriptor().await.unwrap_err();
    assert!(matches!(
        err,
        SuiteError::SetupOrder { record, .. } if record == SESSION_DESCRIPTOR_FILE
    ));
}

#[tokio::test]
async fn test_latest_write_wins() {
    init_test_env();
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path());

    store
        .write_signup_record(&fixtures::signup_record_with("first@yopmail.com", "Password1@"))
        .await
        .unwrap();
    store
        .write_signup_record(&fixtures::signup_record_with("second@yopmail.com", "Password1@"))
        .await
        .unwrap();

    let record = store.read_signup_record().await.unwrap();
    assert_eq!(record.email, "second@yopmail.com");

    // 一時ファイルが残っていない
    let leftovers = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp-"))
        .count();
    assert_eq!(leftovers, 0);
}

#[tokio::test]
async fn test_records_visible_to_another_instance() {
    init_test_env();
    let dir = tempfile::tempdir().unwrap();

    FileCredentialStore::new(dir.path())
        .write_session_descriptor(&descriptor("a@yopmail.com"))
        .await
        .unwrap();

    let reread = FileCredentialStore::new(dir.path())
        .read_session_descriptor()
        .await
        .unwrap();
    assert_eq!(reread, descriptor("a@yopmail.com"));
}

#[tokio::test]
async fn test_files_use_camel_case_keys() {
    init_test_env();
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path());

    store
        .write_signup_record(&fixtures::signup_record())
        .await
        .unwrap();
    store
        .write_session_descriptor(&descriptor("a@yopmail.com"))
        .await
        .unwrap();

    let signup: Value =
        serde_json::from_slice(&std::fs::read(store.signup_record_path()).unwrap()).unwrap();
    assert!(signup.get("fullName").is_some());
    assert!(signup.get("phoneNumber").is_some());
    assert!(signup.get("full_name").is_none());

    let session: Value =
        serde_json::from_slice(&std::fs::read(store.session_descriptor_path()).unwrap()).unwrap();
    assert_eq!(session["customerId"], "cus-1");
    assert_eq!(session["userType"], "Customer");
}

#[tokio::test]
async fn test_corrupt_file_is_serialization_error() {
    init_test_env();
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path());
    std::fs::write(store.signup_record_path(), b"{ not json").unwrap();

    let err = store.read_signup_record().await.unwrap_err();
    assert!(matches!(err, SuiteError::Serialization(_)));
}
