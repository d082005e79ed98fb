use std::sync::Arc;
use std::time::Duration;

use innvo_cloud::S3JobFetcher;
use innvo_core::jobs::{JobFetcher, JobTrigger, LocalJobFetcher, ProcessJobRunner};

use crate::config::{JobConfig, JobStorage};
use crate::service::AssetService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Asset operations over the configured store.
    pub assets: AssetService,
    /// Job trigger; `None` when no job is configured.
    pub jobs: Option<Arc<JobTrigger>>,
}

/// Assemble the job trigger described by `config`.
pub async fn build_job_trigger(config: &JobConfig) -> JobTrigger {
    let fetcher: Arc<dyn JobFetcher> = match &config.storage {
        JobStorage::S3(settings) => Arc::new(S3JobFetcher::from_settings(settings).await),
        JobStorage::Local { root } => Arc::new(LocalJobFetcher::new(root.clone())),
    };

    let mut runner =
        ProcessJobRunner::new(config.runner_program.clone()).with_args(config.runner_args.clone());
    if let Some(dir) = &config.runner_workdir {
        runner = runner.with_working_directory(dir.clone());
    }

    JobTrigger::new(
        fetcher,
        Arc::new(runner),
        config.job.clone(),
        Duration::from_secs(config.timeout_secs),
    )
}
