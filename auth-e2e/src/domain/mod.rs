// src/domain/mod.rs
pub mod session_descriptor;
pub mod signup_record;
pub mod user_type;
