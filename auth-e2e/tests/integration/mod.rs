// tests/integration/mod.rs

mod api_client_tests;
mod credential_store_tests;
mod session_resolver_tests;
