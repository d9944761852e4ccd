// auth-e2e/src/utils/mod.rs

pub mod validation;
