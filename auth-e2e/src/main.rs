// src/main.rs
use std::process::ExitCode;
use std::sync::Arc;

use auth_e2e::config::SuiteConfig;
use auth_e2e::logging::{init_tracing, DEFAULT_FILTER};
use auth_e2e::service::credential_store::FileCredentialStore;
use auth_e2e::suite::{StageContext, SuitePlan, SuiteRunner};

#[tokio::main]
async fn main() -> ExitCode {
    // トレーシングの設定
    init_tracing(DEFAULT_FILTER);

    tracing::info!("Starting auth e2e suite...");

    // 設定を読み込む
    let config = match SuiteConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        "Target: {}, store: {}, fallback policy: {:?}",
        config.base_url,
        config.store_dir.display(),
        config.fallback_policy
    );

    // 実行するステージを決定
    let plan = match config.stages.as_deref() {
        Some(raw) => SuitePlan::parse(raw),
        None => Ok(SuitePlan::full()),
    };
    let plan = match plan {
        Ok(plan) => plan,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let store = Arc::new(FileCredentialStore::new(config.store_dir.clone()));
    let context = match StageContext::new(config, store) {
        Ok(context) => context,
        Err(e) => {
            tracing::error!("Failed to create API client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let report = SuiteRunner::new(context).run(&plan).await;
    tracing::info!("Suite finished\n{}", report);

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
