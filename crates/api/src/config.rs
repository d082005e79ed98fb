use std::path::PathBuf;

use innvo_cloud::{S3Settings, StaticCredentials};
use innvo_core::jobs::JobRef;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`). Not applied to job runs.
    pub request_timeout_secs: u64,
    /// Where assets are persisted.
    pub store: StoreBackend,
    /// Job trigger settings; `None` disables `/api/runJob`.
    pub jobs: Option<JobConfig>,
}

/// Asset persistence backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { database_url: String },
    /// Process-local store; data is lost on restart.
    Memory,
}

/// Where job definitions are fetched from.
#[derive(Debug, Clone)]
pub enum JobStorage {
    S3(S3Settings),
    /// `<root>/<bucket>/<key>` on the local filesystem.
    Local { root: PathBuf },
}

/// External job trigger configuration.
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub job: JobRef,
    pub storage: JobStorage,
    /// Runner executable, e.g. Pentaho `pan.sh`.
    pub runner_program: String,
    /// Runner arguments; `{job_file}` is replaced by the fetched file path.
    pub runner_args: Vec<String>,
    pub runner_workdir: Option<PathBuf>,
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8080`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:9000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `STORE_BACKEND`        | `postgres`                 |
    /// | `DATABASE_URL`         | required for `postgres`    |
    ///
    /// Job settings are described on [`JobConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:9000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let store = match std::env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "postgres".into())
            .as_str()
        {
            "memory" => StoreBackend::Memory,
            "postgres" => StoreBackend::Postgres {
                database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            },
            other => panic!("Unknown STORE_BACKEND '{other}'. Must be one of: postgres, memory"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store,
            jobs: JobConfig::from_env(),
        }
    }
}

impl JobConfig {
    /// Load job trigger settings. Returns `None` unless both `JOB_BUCKET`
    /// and `JOB_KEY` are set.
    ///
    /// | Env Var                 | Default              |
    /// |-------------------------|----------------------|
    /// | `JOB_BUCKET`, `JOB_KEY` | unset (disabled)     |
    /// | `JOB_STORAGE`           | `s3`                 |
    /// | `JOB_LOCAL_ROOT`        | `./jobs`             |
    /// | `AWS_REGION`            | `us-east-1`          |
    /// | `AWS_ACCESS_KEY_ID`     | default AWS chain    |
    /// | `AWS_SECRET_ACCESS_KEY` | default AWS chain    |
    /// | `S3_ENDPOINT`           | AWS                  |
    /// | `JOB_RUNNER_PROGRAM`    | `pan.sh`             |
    /// | `JOB_RUNNER_ARGS`       | `-file={job_file}`   |
    /// | `JOB_RUNNER_WORKDIR`    | current directory    |
    /// | `JOB_TIMEOUT_SECS`      | `3600`               |
    pub fn from_env() -> Option<Self> {
        let bucket = non_empty_var("JOB_BUCKET")?;
        let key = non_empty_var("JOB_KEY")?;

        let storage = match std::env::var("JOB_STORAGE")
            .unwrap_or_else(|_| "s3".into())
            .as_str()
        {
            "local" => JobStorage::Local {
                root: non_empty_var("JOB_LOCAL_ROOT")
                    .unwrap_or_else(|| "./jobs".into())
                    .into(),
            },
            "s3" => JobStorage::S3(S3Settings {
                region: non_empty_var("AWS_REGION").unwrap_or_else(|| "us-east-1".into()),
                endpoint: non_empty_var("S3_ENDPOINT"),
                credentials: match (
                    non_empty_var("AWS_ACCESS_KEY_ID"),
                    non_empty_var("AWS_SECRET_ACCESS_KEY"),
                ) {
                    (Some(access_key_id), Some(secret_access_key)) => Some(StaticCredentials {
                        access_key_id,
                        secret_access_key,
                    }),
                    _ => None,
                },
            }),
            other => panic!("Unknown JOB_STORAGE '{other}'. Must be one of: s3, local"),
        };

        let runner_args = parse_args(
            &std::env::var("JOB_RUNNER_ARGS").unwrap_or_else(|_| "-file={job_file}".into()),
        );

        let timeout_secs: u64 = std::env::var("JOB_TIMEOUT_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("JOB_TIMEOUT_SECS must be a valid u64");

        Some(Self {
            job: JobRef::new(bucket, key),
            storage,
            runner_program: non_empty_var("JOB_RUNNER_PROGRAM").unwrap_or_else(|| "pan.sh".into()),
            runner_args,
            runner_workdir: non_empty_var("JOB_RUNNER_WORKDIR").map(PathBuf::from),
            timeout_secs,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Split a whitespace-separated argument list.
fn parse_args(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}
