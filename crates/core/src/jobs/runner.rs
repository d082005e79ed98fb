//! The opaque runner capability that executes a fetched job definition.

use std::path::Path;

use serde::Serialize;

use super::error::JobError;

/// Captured result of a completed job run.
#[derive(Debug, Clone, Serialize)]
pub struct JobOutput {
    /// Process exit code (`0` for in-process engines that succeed).
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Executes a job definition to completion.
///
/// `run` resolves only once the job has finished or failed. A non-success
/// outcome must be reported as [`JobError::ExecutionFailed`], never as an
/// `Ok` carrying a failing exit code. Dropping the returned future must stop
/// the job; [`JobTrigger`](super::JobTrigger) relies on that for timeouts.
#[async_trait::async_trait]
pub trait ExternalJobRunner: Send + Sync {
    async fn run(&self, job_file: &Path) -> Result<JobOutput, JobError>;
}
