//! Job definition references and fetchers.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::JobError;

/// Location of a job definition in object storage.
///
/// `bucket` may carry a path prefix (`innvo-pentaho/transformations`); the
/// first segment is the bucket proper and the rest prefixes `key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRef {
    pub bucket: String,
    pub key: String,
}

impl JobRef {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Split into `(bucket name, full object key)` for object-store APIs.
    pub fn object_location(&self) -> (&str, String) {
        let bucket = self.bucket.trim_matches('/');
        let key = self.key.trim_start_matches('/');
        match bucket.split_once('/') {
            Some((name, prefix)) => (name, format!("{}/{key}", prefix.trim_end_matches('/'))),
            None => (bucket, key.to_string()),
        }
    }

    /// File name of the object (the last key segment).
    pub fn file_name(&self) -> &str {
        self.key
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or("job")
    }
}

impl fmt::Display for JobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (bucket, key) = self.object_location();
        write!(f, "{bucket}/{key}")
    }
}

/// Copies a job definition out of storage into a local file.
#[async_trait::async_trait]
pub trait JobFetcher: Send + Sync {
    /// Write the object named by `job` to `dest`, returning the bytes written.
    ///
    /// Any failure to retrieve the object is [`JobError::FetchFailed`].
    async fn fetch(&self, job: &JobRef, dest: &Path) -> Result<u64, JobError>;
}

/// Fetches job definitions from a directory tree laid out as
/// `<root>/<bucket>/<key>`. Used for local development and tests.
#[derive(Debug, Clone)]
pub struct LocalJobFetcher {
    root: PathBuf,
}

impl LocalJobFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the source path, refusing anything that escapes `root`.
    fn source_path(&self, job: &JobRef) -> Result<PathBuf, JobError> {
        let (bucket, key) = job.object_location();
        let relative = Path::new(bucket).join(key);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes {
            return Err(JobError::fetch_failed(job, "object key must be a relative path"));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait::async_trait]
impl JobFetcher for LocalJobFetcher {
    async fn fetch(&self, job: &JobRef, dest: &Path) -> Result<u64, JobError> {
        let source = self.source_path(job)?;
        tokio::fs::copy(&source, dest)
            .await
            .map_err(|e| JobError::fetch_failed(job, format!("{}: {e}", source.display())))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn bucket_prefix_moves_into_key() {
        let job = JobRef::new("innvo-pentaho/transformations", "transformation1.ktr");
        let (bucket, key) = job.object_location();
        assert_eq!(bucket, "innvo-pentaho");
        assert_eq!(key, "transformations/transformation1.ktr");
        assert_eq!(
            job.to_string(),
            "innvo-pentaho/transformations/transformation1.ktr"
        );
    }

    #[test]
    fn plain_bucket_is_unchanged() {
        let job = JobRef::new("jobs", "/nightly/load.ktr");
        assert_eq!(job.object_location(), ("jobs", "nightly/load.ktr".to_string()));
        assert_eq!(job.file_name(), "load.ktr");
    }

    #[tokio::test]
    async fn local_fetch_copies_object() {
        let root = tempfile::tempdir().expect("root");
        let dir = root.path().join("bucket").join("etl");
        std::fs::create_dir_all(&dir).expect("mkdir");
        std::fs::write(dir.join("t1.ktr"), b"<transformation/>").expect("write");

        let dest_dir = tempfile::tempdir().expect("dest");
        let dest = dest_dir.path().join("copy.ktr");
        let fetcher = LocalJobFetcher::new(root.path());
        let written = fetcher
            .fetch(&JobRef::new("bucket/etl", "t1.ktr"), &dest)
            .await
            .expect("fetch");

        assert_eq!(written, 17);
        assert_eq!(std::fs::read(&dest).expect("read"), b"<transformation/>");
    }

    #[tokio::test]
    async fn missing_object_is_fetch_failure() {
        let root = tempfile::tempdir().expect("root");
        let dest = root.path().join("out.ktr");
        let err = LocalJobFetcher::new(root.path())
            .fetch(&JobRef::new("bucket", "missing.ktr"), &dest)
            .await
            .unwrap_err();
        assert_matches!(err, JobError::FetchFailed { .. });
    }

    #[tokio::test]
    async fn traversal_is_rejected() {
        let root = tempfile::tempdir().expect("root");
        let dest = root.path().join("out.ktr");
        let err = LocalJobFetcher::new(root.path())
            .fetch(&JobRef::new("bucket", "../../etc/passwd"), &dest)
            .await
            .unwrap_err();
        assert_matches!(err, JobError::FetchFailed { reason, .. } if reason.contains("relative"));
    }
}
