// src/test_data/mod.rs

//! ステージが送信するテストデータの生成

pub mod email;
pub mod factory;
pub mod phone;

pub use factory::TestDataFactory;
