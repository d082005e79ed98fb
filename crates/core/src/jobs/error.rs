//! Error types for job fetching and execution.

/// Errors reported by [`JobTrigger`](super::JobTrigger) and its collaborators.
///
/// Failures are reported once; retrying is the caller's decision.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    /// The job definition could not be retrieved from storage.
    #[error("Failed to fetch job definition {job}: {reason}")]
    FetchFailed { job: String, reason: String },

    /// The external runner failed, exited non-zero, or timed out.
    #[error("Job execution failed: {cause}")]
    ExecutionFailed { cause: JobFailureCause },
}

impl JobError {
    pub fn fetch_failed(job: impl ToString, reason: impl ToString) -> Self {
        Self::FetchFailed {
            job: job.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error is a run that exceeded its time budget.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::ExecutionFailed {
                cause: JobFailureCause::Timeout { .. }
            }
        )
    }
}

impl From<JobFailureCause> for JobError {
    fn from(cause: JobFailureCause) -> Self {
        Self::ExecutionFailed { cause }
    }
}

/// Why an execution failed.
#[derive(Debug, thiserror::Error)]
pub enum JobFailureCause {
    #[error("runner exited with code {exit_code}: {stderr}")]
    NonZeroExit { exit_code: i32, stderr: String },

    #[error("runner timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    #[error("runner could not be started: {0}")]
    Spawn(#[source] std::io::Error),
}
