//! Fetch-then-run orchestration with scoped temporary files.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tempfile::NamedTempFile;

use super::error::{JobError, JobFailureCause};
use super::fetch::{JobFetcher, JobRef};
use super::runner::{ExternalJobRunner, JobOutput};

/// A fetched job definition on local disk. The file is removed when this
/// value is dropped.
#[derive(Debug)]
pub struct ScopedJobFile {
    file: NamedTempFile,
    size_bytes: u64,
}

impl ScopedJobFile {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}

/// Fetches a configured job definition and runs it to completion.
pub struct JobTrigger {
    fetcher: Arc<dyn JobFetcher>,
    runner: Arc<dyn ExternalJobRunner>,
    job: JobRef,
    timeout: Duration,
    temp_dir: Option<PathBuf>,
}

impl JobTrigger {
    pub fn new(
        fetcher: Arc<dyn JobFetcher>,
        runner: Arc<dyn ExternalJobRunner>,
        job: JobRef,
        timeout: Duration,
    ) -> Self {
        Self {
            fetcher,
            runner,
            job,
            timeout,
            temp_dir: None,
        }
    }

    /// Place temporary job files in `dir` instead of the system temp dir.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn job(&self) -> &JobRef {
        &self.job
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Copy the job definition into a fresh temporary file.
    ///
    /// On failure the partially written file is already gone when this
    /// returns.
    pub async fn fetch(&self) -> Result<ScopedJobFile, JobError> {
        let file = self.create_temp_file()?;
        let size_bytes = self.fetcher.fetch(&self.job, file.path()).await?;

        tracing::debug!(
            job = %self.job,
            path = %file.path().display(),
            size_bytes,
            "Job definition fetched",
        );

        Ok(ScopedJobFile { file, size_bytes })
    }

    /// Fetch the job definition and run it, waiting for completion or for
    /// the configured timeout. No retry is attempted.
    pub async fn run(&self) -> Result<JobOutput, JobError> {
        let job_file = self.fetch().await?;
        let start = Instant::now();

        let result = match tokio::time::timeout(self.timeout, self.runner.run(job_file.path()))
            .await
        {
            Ok(result) => result,
            Err(_elapsed) => Err(JobFailureCause::Timeout {
                elapsed_ms: start.elapsed().as_millis() as u64,
            }
            .into()),
        };

        match &result {
            Ok(output) => tracing::info!(
                job = %self.job,
                duration_ms = output.duration_ms,
                "Job completed",
            ),
            Err(e) => tracing::error!(job = %self.job, error = %e, "Job failed"),
        }

        drop(job_file);
        result
    }

    fn create_temp_file(&self) -> Result<NamedTempFile, JobError> {
        let file_name = self.job.file_name();
        let (stem, extension) = match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, format!(".{ext}")),
            _ => (file_name, String::new()),
        };

        let mut builder = tempfile::Builder::new();
        builder.prefix(stem).suffix(&extension);
        let created = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        };
        created.map_err(|e| JobError::fetch_failed(&self.job, format!("temporary file: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;

    use super::*;
    use crate::jobs::fetch::LocalJobFetcher;
    use crate::jobs::process::ProcessJobRunner;

    /// Records the path it was handed and whether the file existed then.
    struct RecordingRunner {
        seen: Mutex<Option<(PathBuf, bool)>>,
        outcome: fn() -> Result<JobOutput, JobError>,
    }

    impl RecordingRunner {
        fn new(outcome: fn() -> Result<JobOutput, JobError>) -> Arc<Self> {
            Arc::new(Self {
                seen: Mutex::new(None),
                outcome,
            })
        }

        fn seen_path(&self) -> PathBuf {
            let seen = self.seen.lock().unwrap();
            let (path, existed) = seen.clone().expect("runner was not invoked");
            assert!(existed, "job file must exist while the runner runs");
            path
        }
    }

    #[async_trait::async_trait]
    impl ExternalJobRunner for RecordingRunner {
        async fn run(&self, job_file: &Path) -> Result<JobOutput, JobError> {
            *self.seen.lock().unwrap() = Some((job_file.to_path_buf(), job_file.exists()));
            (self.outcome)()
        }
    }

    /// Never finishes on its own.
    struct StuckRunner;

    #[async_trait::async_trait]
    impl ExternalJobRunner for StuckRunner {
        async fn run(&self, _job_file: &Path) -> Result<JobOutput, JobError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            unreachable!("timeout must fire first")
        }
    }

    fn ok_output() -> Result<JobOutput, JobError> {
        Ok(JobOutput {
            exit_code: 0,
            stdout: "done".into(),
            stderr: String::new(),
            duration_ms: 1,
        })
    }

    fn failing_output() -> Result<JobOutput, JobError> {
        Err(JobFailureCause::NonZeroExit {
            exit_code: 1,
            stderr: "boom".into(),
        }
        .into())
    }

    /// Storage root holding `etl/transformations/t1.ktr` plus an empty
    /// scratch directory for temporary job files.
    struct Fixture {
        storage: tempfile::TempDir,
        scratch: tempfile::TempDir,
    }

    impl Fixture {
        fn new(contents: &str) -> Self {
            let storage = tempfile::tempdir().expect("storage dir");
            let dir = storage.path().join("etl").join("transformations");
            std::fs::create_dir_all(&dir).expect("mkdir");
            std::fs::write(dir.join("t1.ktr"), contents).expect("write job");
            Self {
                storage,
                scratch: tempfile::tempdir().expect("scratch dir"),
            }
        }

        fn trigger(&self, runner: Arc<dyn ExternalJobRunner>, key: &str) -> JobTrigger {
            JobTrigger::new(
                Arc::new(LocalJobFetcher::new(self.storage.path())),
                runner,
                JobRef::new("etl/transformations", key),
                Duration::from_secs(5),
            )
            .with_temp_dir(self.scratch.path())
        }

        fn scratch_is_empty(&self) -> bool {
            std::fs::read_dir(self.scratch.path())
                .expect("read scratch")
                .next()
                .is_none()
        }
    }

    #[tokio::test]
    async fn fetch_keeps_name_and_extension() {
        let fx = Fixture::new("<transformation/>");
        let trigger = fx.trigger(RecordingRunner::new(ok_output), "t1.ktr");

        let file = trigger.fetch().await.expect("fetch");
        let name = file.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("t1"), "unexpected name {name}");
        assert!(name.ends_with(".ktr"), "unexpected name {name}");
        assert_eq!(file.size_bytes(), 17);

        let path = file.path().to_path_buf();
        drop(file);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn successful_run_removes_job_file() {
        let fx = Fixture::new("<transformation/>");
        let runner = RecordingRunner::new(ok_output);
        let trigger = fx.trigger(runner.clone(), "t1.ktr");

        let output = trigger.run().await.expect("run");
        assert_eq!(output.stdout, "done");
        assert!(!runner.seen_path().exists());
        assert!(fx.scratch_is_empty());
    }

    #[tokio::test]
    async fn runner_failure_removes_job_file() {
        let fx = Fixture::new("<transformation/>");
        let runner = RecordingRunner::new(failing_output);
        let trigger = fx.trigger(runner.clone(), "t1.ktr");

        let err = trigger.run().await.unwrap_err();
        assert_matches!(
            err,
            JobError::ExecutionFailed {
                cause: JobFailureCause::NonZeroExit { exit_code: 1, .. }
            }
        );
        assert!(!runner.seen_path().exists());
        assert!(fx.scratch_is_empty());
    }

    #[tokio::test]
    async fn fetch_failure_skips_runner_and_cleans_up() {
        let fx = Fixture::new("<transformation/>");
        let runner = RecordingRunner::new(ok_output);
        let trigger = fx.trigger(runner.clone(), "missing.ktr");

        let err = trigger.run().await.unwrap_err();
        assert_matches!(err, JobError::FetchFailed { .. });
        assert!(runner.seen.lock().unwrap().is_none());
        assert!(fx.scratch_is_empty());
    }

    #[tokio::test]
    async fn timeout_is_execution_failure() {
        let fx = Fixture::new("<transformation/>");
        let trigger = JobTrigger::new(
            Arc::new(LocalJobFetcher::new(fx.storage.path())),
            Arc::new(StuckRunner),
            JobRef::new("etl/transformations", "t1.ktr"),
            Duration::from_millis(50),
        )
        .with_temp_dir(fx.scratch.path());

        let err = trigger.run().await.unwrap_err();
        assert!(err.is_timeout());
        assert!(fx.scratch_is_empty());
    }

    #[tokio::test]
    async fn process_exit_code_surfaces_and_cleans_up() {
        let fx = Fixture::new("echo 'transform failed' >&2\nexit 4\n");
        let trigger = fx.trigger(Arc::new(ProcessJobRunner::new("bash")), "t1.ktr");

        let err = trigger.run().await.unwrap_err();
        assert_matches!(
            err,
            JobError::ExecutionFailed {
                cause: JobFailureCause::NonZeroExit { exit_code: 4, .. }
            }
        );
        assert!(fx.scratch_is_empty());
    }

    #[tokio::test]
    async fn process_timeout_kills_runner() {
        let fx = Fixture::new("sleep 60\n");
        let trigger = JobTrigger::new(
            Arc::new(LocalJobFetcher::new(fx.storage.path())),
            Arc::new(ProcessJobRunner::new("bash")),
            JobRef::new("etl/transformations", "t1.ktr"),
            Duration::from_millis(200),
        )
        .with_temp_dir(fx.scratch.path());

        let err = trigger.run().await.unwrap_err();
        assert!(err.is_timeout());
        assert!(fx.scratch_is_empty());
    }
}
