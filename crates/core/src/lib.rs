//! Domain building blocks for the Innvo asset service.
//!
//! Pure logic only: no database access and no HTTP. The `db` crate builds
//! persistence on top of these types and the `api` crate exposes them over
//! HTTP.

pub mod assets;
pub mod error;
pub mod jobs;
pub mod pagination;
pub mod types;
