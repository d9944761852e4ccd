// src/lib.rs
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod service;
pub mod shared;
pub mod suite;
pub mod test_data;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::SuiteConfig;
pub use domain::session_descriptor::SessionDescriptor;
pub use domain::signup_record::SignupRecord;
pub use error::{SuiteError, SuiteResult};
pub use service::credential_store::{CredentialStore, FileCredentialStore, InMemoryCredentialStore};
pub use service::session_resolver::{PasswordTier, SessionResolver};
