//! S3-backed job definition fetcher.
//!
//! Credentials come from [`S3Settings`], which the caller resolves from its
//! own configuration. When no static credentials are given the default AWS
//! provider chain is used (environment, profile, instance role).

use std::fmt;
use std::path::Path;

use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::Client as S3Client;
use innvo_core::jobs::{JobError, JobFetcher, JobRef};
use tokio::io::AsyncWriteExt;

/// Provider name reported by the SDK for credentials supplied through config.
const CREDENTIALS_PROVIDER_NAME: &str = "innvo-config";

/// Static access key pair.
#[derive(Clone)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Connection settings for the S3 client.
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub region: String,
    /// Custom endpoint for S3-compatible stores (MinIO, LocalStack).
    /// Path-style addressing is used when set.
    pub endpoint: Option<String>,
    pub credentials: Option<StaticCredentials>,
}

/// Fetches job definitions with `GetObject`.
#[derive(Debug, Clone)]
pub struct S3JobFetcher {
    client: S3Client,
}

impl S3JobFetcher {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    /// Build a client from settings. SDK retries are disabled: a failed fetch
    /// is reported once and the caller decides whether to try again.
    pub async fn from_settings(settings: &S3Settings) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .retry_config(RetryConfig::disabled());

        if let Some(creds) = &settings.credentials {
            loader = loader.credentials_provider(Credentials::new(
                creds.access_key_id.clone(),
                creds.secret_access_key.clone(),
                None,
                None,
                CREDENTIALS_PROVIDER_NAME,
            ));
        }

        let shared = loader.load().await;
        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = &settings.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        tracing::info!(
            region = %settings.region,
            endpoint = settings.endpoint.as_deref().unwrap_or("aws"),
            static_credentials = settings.credentials.is_some(),
            "S3 job fetcher configured",
        );

        Self::new(S3Client::from_conf(builder.build()))
    }
}

#[async_trait::async_trait]
impl JobFetcher for S3JobFetcher {
    async fn fetch(&self, job: &JobRef, dest: &Path) -> Result<u64, JobError> {
        let (bucket, key) = job.object_location();

        let resp = self
            .client
            .get_object()
            .bucket(bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| JobError::fetch_failed(job, DisplayErrorContext(&e)))?;

        let mut body = resp.body;
        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| JobError::fetch_failed(job, e))?;

        let mut written: u64 = 0;
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| JobError::fetch_failed(job, e))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| JobError::fetch_failed(job, e))?;
            written += chunk.len() as u64;
        }
        file.flush()
            .await
            .map_err(|e| JobError::fetch_failed(job, e))?;

        tracing::debug!(bucket, key = %key, written, "Fetched job definition from S3");
        Ok(written)
    }
}
