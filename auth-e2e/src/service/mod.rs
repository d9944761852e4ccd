// src/service/mod.rs
pub mod credential_store;
pub mod session_resolver;
