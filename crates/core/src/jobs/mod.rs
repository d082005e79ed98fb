//! External job triggering.
//!
//! A job definition (for example a Pentaho `.ktr` transformation) lives in
//! object storage. [`JobTrigger`] copies it into a scoped temporary file via a
//! [`JobFetcher`], hands that file to an [`ExternalJobRunner`], and waits for
//! the run to finish. The temporary file is removed on every exit path.

pub mod error;
pub mod fetch;
pub mod process;
pub mod runner;
pub mod trigger;

pub use error::{JobError, JobFailureCause};
pub use fetch::{JobFetcher, JobRef, LocalJobFetcher};
pub use process::ProcessJobRunner;
pub use runner::{ExternalJobRunner, JobOutput};
pub use trigger::{JobTrigger, ScopedJobFile};
