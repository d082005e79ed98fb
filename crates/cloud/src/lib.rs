//! Cloud storage integrations.
//!
//! Currently a single S3-compatible [`JobFetcher`](innvo_core::jobs::JobFetcher)
//! used to pull job definitions before they are run.

pub mod s3;

pub use s3::{S3JobFetcher, S3Settings, StaticCredentials};
