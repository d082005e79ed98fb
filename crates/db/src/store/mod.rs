//! The persistence contract the asset service is written against.
//!
//! [`PgAssetStore`] backs production; [`InMemoryAssetStore`] backs tests and
//! database-free local runs. Both enforce the same identity and paging rules.

mod memory;
mod postgres;

use innvo_core::error::CoreError;
use innvo_core::pagination::Page;
use innvo_core::types::DbId;

use crate::models::asset::{Asset, AssetPayload};

pub use memory::InMemoryAssetStore;
pub use postgres::PgAssetStore;

/// Errors raised by an [`AssetStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A domain rule was violated (unknown id, identity misuse, bad paging).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The backing database failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Core(CoreError::NotFound { .. } | CoreError::MissingId { .. })
                | Self::Database(sqlx::Error::RowNotFound)
        )
    }
}

/// CRUD primitives over assets.
///
/// - `create` rejects a payload that already carries an `id` and assigns a
///   fresh one.
/// - `update` fully replaces an existing record; an unset or unknown `id`
///   is not-found.
/// - `list` orders by `id` ascending. Page numbers are zero-based, a page
///   size of zero or less is invalid, and a page past the end is empty.
/// - `delete` is not idempotent: deleting a missing record is not-found.
#[async_trait::async_trait]
pub trait AssetStore: Send + Sync {
    async fn create(&self, asset: AssetPayload) -> Result<Asset, StoreError>;

    async fn update(&self, asset: AssetPayload) -> Result<Asset, StoreError>;

    async fn get(&self, id: DbId) -> Result<Asset, StoreError>;

    async fn list(&self, page_number: i64, page_size: i64) -> Result<Page<Asset>, StoreError>;

    async fn delete(&self, id: DbId) -> Result<(), StoreError>;

    /// Confirm the backing storage is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Not-found error for the asset with `id`.
pub(crate) fn not_found(id: DbId) -> StoreError {
    StoreError::Core(CoreError::NotFound {
        entity: innvo_core::assets::ENTITY_NAME,
        id,
    })
}
