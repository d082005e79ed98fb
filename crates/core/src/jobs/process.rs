//! Subprocess-backed job runner.
//!
//! Spawns a configured program (for example Pentaho's `pan.sh`) with the job
//! file on its command line, captures stdout/stderr, and maps a non-zero exit
//! to [`JobFailureCause::NonZeroExit`].

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use super::error::{JobError, JobFailureCause};
use super::runner::{ExternalJobRunner, JobOutput};

/// Placeholder in runner arguments replaced by the fetched job file path.
pub const JOB_FILE_PLACEHOLDER: &str = "{job_file}";

/// Maximum stdout or stderr size captured per stream (10 MiB).
const MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

/// Maximum stderr length carried inside an error message.
const MAX_ERROR_STDERR_CHARS: usize = 4096;

/// Runs a job definition by spawning an external program.
#[derive(Debug, Clone)]
pub struct ProcessJobRunner {
    program: String,
    args: Vec<String>,
    working_directory: Option<PathBuf>,
    env_vars: Vec<(String, String)>,
}

impl ProcessJobRunner {
    /// A runner that invokes `program` with the job file as its only argument.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec![JOB_FILE_PLACEHOLDER.to_string()],
            working_directory: None,
            env_vars: Vec::new(),
        }
    }

    /// Replace the argument list. Every [`JOB_FILE_PLACEHOLDER`] is
    /// substituted; when none is present the job path is appended.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.push((key.into(), value.into()));
        self
    }

    fn command_args(&self, job_file: &Path) -> Vec<String> {
        let path = job_file.to_string_lossy();
        let mut substituted = false;
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                if arg.contains(JOB_FILE_PLACEHOLDER) {
                    substituted = true;
                    arg.replace(JOB_FILE_PLACEHOLDER, &path)
                } else {
                    arg.clone()
                }
            })
            .collect();
        if !substituted {
            args.push(path.into_owned());
        }
        args
    }
}

#[async_trait::async_trait]
impl ExternalJobRunner for ProcessJobRunner {
    async fn run(&self, job_file: &Path) -> Result<JobOutput, JobError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.command_args(job_file))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // The child dies with the future, which is how timeouts stop it.
            .kill_on_drop(true);

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }
        if let Some(dir) = &self.working_directory {
            cmd.current_dir(dir);
        }

        tracing::debug!(program = %self.program, job_file = %job_file.display(), "Spawning job runner");

        let start = Instant::now();
        let mut child = cmd.spawn().map_err(JobFailureCause::Spawn)?;

        let stdout_handle = child.stdout.take();
        let stderr_handle = child.stderr.take();
        let stdout_task = tokio::spawn(async move { read_stream(stdout_handle, "stdout").await });
        let stderr_task = tokio::spawn(async move { read_stream(stderr_handle, "stderr").await });

        let status = child.wait().await.map_err(JobFailureCause::Spawn)?;
        let duration_ms = start.elapsed().as_millis() as u64;

        let stdout_bytes = join_stream(stdout_task, "stdout").await;
        let stderr_bytes = join_stream(stderr_task, "stderr").await;
        let stdout = String::from_utf8_lossy(&stdout_bytes).into_owned();
        let stderr = String::from_utf8_lossy(&stderr_bytes).into_owned();
        // Killed by a signal.
        let exit_code = status.code().unwrap_or(-1);

        if !status.success() {
            return Err(JobFailureCause::NonZeroExit {
                exit_code,
                stderr: tail(&stderr, MAX_ERROR_STDERR_CHARS),
            }
            .into());
        }

        Ok(JobOutput {
            exit_code,
            stdout,
            stderr,
            duration_ms,
        })
    }
}

/// Read an output stream into a byte buffer, keeping the first
/// [`MAX_OUTPUT_BYTES`]. The remainder is drained and discarded so the child
/// never writes into a closed pipe.
async fn read_stream<R: AsyncRead + Unpin>(handle: Option<R>, stream: &'static str) -> Vec<u8> {
    let mut buf = Vec::new();
    let Some(mut h) = handle else {
        return buf;
    };

    if let Err(e) = (&mut h)
        .take(MAX_OUTPUT_BYTES as u64)
        .read_to_end(&mut buf)
        .await
    {
        tracing::warn!(stream, error = %e, "Failed to read job runner output");
        return buf;
    }

    match tokio::io::copy(&mut h, &mut tokio::io::sink()).await {
        Ok(0) => {}
        Ok(dropped) => {
            tracing::warn!(stream, dropped, "Job runner output truncated");
        }
        Err(e) => {
            tracing::warn!(stream, error = %e, "Failed to drain job runner output");
        }
    }
    buf
}

async fn join_stream(task: tokio::task::JoinHandle<Vec<u8>>, stream: &'static str) -> Vec<u8> {
    match task.await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(stream, error = %e, "Job runner output reader failed");
            Vec::new()
        }
    }
}

/// Keep the last `max_chars` characters of `text`, trimmed.
fn tail(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    let count = trimmed.chars().count();
    if count <= max_chars {
        return trimmed.to_string();
    }
    trimmed.chars().skip(count - max_chars).collect()
}
