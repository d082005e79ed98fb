//! Handler for the external job trigger.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Outcome of a completed job run.
#[derive(Debug, Serialize)]
pub struct JobRunSummary {
    /// `bucket/key` of the job definition that ran.
    pub job: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub exit_code: i32,
    pub stdout: String,
}

/// GET /api/runJob
///
/// Fetches the configured job definition and blocks until the runner
/// finishes or the job timeout expires. The run continues in the background
/// if the client disconnects; its temporary file is still removed.
pub async fn run_job(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let trigger = state
        .jobs
        .as_ref()
        .map(Arc::clone)
        .ok_or_else(|| AppError::ServiceUnavailable("No job is configured".to_string()))?;

    let job = trigger.job().to_string();
    tracing::info!(job = %job, "Job run requested");

    let started_at = Utc::now();
    let output = tokio::spawn(async move { trigger.run().await })
        .await
        .map_err(|e| AppError::InternalError(format!("Job task failed: {e}")))??;
    let finished_at = Utc::now();

    Ok(Json(DataResponse {
        data: JobRunSummary {
            job,
            started_at,
            finished_at,
            duration_ms: output.duration_ms,
            exit_code: output.exit_code,
            stdout: output.stdout,
        },
    }))
}
