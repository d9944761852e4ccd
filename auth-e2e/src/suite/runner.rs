// src/suite/runner.rs

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::flows;
use super::stage::{Stage, SuitePlan};
use crate::api::AuthApiClient;
use crate::config::SuiteConfig;
use crate::error::SuiteResult;
use crate::log_with_context;
use crate::service::credential_store::CredentialStore;
use crate::service::session_resolver::SessionResolver;

/// ステージの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Passed,
    Failed(String),
    Skipped(String),
}

impl StageOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for StageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed(reason) => write!(f, "failed: {}", reason),
            Self::Skipped(reason) => write!(f, "skipped: {}", reason),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StageReport {
    pub stage: Stage,
    pub outcome: StageOutcome,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    pub stages: Vec<StageReport>,
}

impl SuiteReport {
    pub fn outcome_of(&self, stage: Stage) -> Option<&StageOutcome> {
        self.stages
            .iter()
            .find(|report| report.stage == stage)
            .map(|report| &report.outcome)
    }

    pub fn passed(&self) -> usize {
        self.stages.iter().filter(|r| r.outcome.is_passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.stages.iter().filter(|r| r.outcome.is_failed()).count()
    }

    pub fn skipped(&self) -> usize {
        self.stages.len() - self.passed() - self.failed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.stages {
            writeln!(
                f,
                "  {:<18} {} ({}ms)",
                report.stage.as_str(),
                report.outcome,
                report.elapsed.as_millis()
            )?;
        }
        write!(
            f,
            "{} passed, {} failed, {} skipped",
            self.passed(),
            self.failed(),
            self.skipped()
        )
    }
}

/// 各ステージに渡す共有コンテキスト
pub struct StageContext {
    pub config: SuiteConfig,
    pub client: AuthApiClient,
    pub store: Arc<dyn CredentialStore>,
    pub resolver: SessionResolver,
}

impl StageContext {
    pub fn new(config: SuiteConfig, store: Arc<dyn CredentialStore>) -> SuiteResult<Self> {
        let client = AuthApiClient::new(&config)?;
        Ok(Self::with_client(config, client, store))
    }

    pub fn with_client(
        config: SuiteConfig,
        client: AuthApiClient,
        store: Arc<dyn CredentialStore>,
    ) -> Self {
        let resolver = SessionResolver::new(&config, client.clone(), store.clone());
        Self {
            config,
            client,
            store,
            resolver,
        }
    }
}

/// プランに従ってステージを順番に実行する
pub struct SuiteRunner {
    context: StageContext,
}

impl SuiteRunner {
    pub fn new(context: StageContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &StageContext {
        &self.context
    }

    pub async fn run(&self, plan: &SuitePlan) -> SuiteReport {
        let mut report = SuiteReport::default();

        for &stage in plan.stages() {
            let started = Instant::now();

            let outcome = match Self::blocking_dependency(stage, plan, &report) {
                Some(dependency) => {
                    StageOutcome::Skipped(format!("dependency `{}` did not pass", dependency))
                }
                None => {
                    tracing::info!("Stage {} started", stage);
                    match flows::run_stage(stage, &self.context).await {
                        Ok(outcome) => outcome,
                        Err(e) => StageOutcome::Failed(e.to_string()),
                    }
                }
            };

            match &outcome {
                StageOutcome::Failed(reason) => log_with_context!(
                    tracing::Level::ERROR,
                    "Stage failed",
                    "stage" => stage.as_str(),
                    "reason" => reason,
                ),
                StageOutcome::Skipped(reason) => log_with_context!(
                    tracing::Level::WARN,
                    "Stage skipped",
                    "stage" => stage.as_str(),
                    "reason" => reason,
                ),
                StageOutcome::Passed => log_with_context!(
                    tracing::Level::INFO,
                    "Stage passed",
                    "stage" => stage.as_str(),
                    "elapsed_ms" => started.elapsed().as_millis(),
                ),
            }

            report.stages.push(StageReport {
                stage,
                outcome,
                elapsed: started.elapsed(),
            });
        }

        report
    }

    /// プラン内の依存先のうち、成功していないもの
    fn blocking_dependency(stage: Stage, plan: &SuitePlan, report: &SuiteReport) -> Option<Stage> {
        stage.depends_on().iter().copied().find(|&dependency| {
            plan.contains(dependency)
                && !report
                    .outcome_of(dependency)
                    .is_some_and(StageOutcome::is_passed)
        })
    }
}
