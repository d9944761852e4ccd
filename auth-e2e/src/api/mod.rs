// src/api/mod.rs
pub mod client;
pub mod dto;

pub use client::AuthApiClient;
