// src/suite/mod.rs

//! 認証APIに対するE2Eスイート
//!
//! ステージは `SuitePlan` の順に逐次実行され、サインアップで永続化された
//! 資格情報を後続のステージ（別プロセスでの実行を含む）が共有します。

pub mod check;
pub mod flows;
pub mod runner;
pub mod stage;

pub use runner::{StageContext, StageOutcome, StageReport, SuiteReport, SuiteRunner};
pub use stage::{Stage, SuitePlan};
