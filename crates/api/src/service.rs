//! Transport-independent asset operations.
//!
//! [`AssetService`] owns the identity rules that decide between create and
//! update, and translates store results into shapes the HTTP layer can map
//! without special-casing errors. It keeps no state of its own.

use std::sync::Arc;

use innvo_core::assets::ensure_unassigned;
use innvo_core::pagination::Page;
use innvo_core::types::DbId;
use innvo_db::models::asset::{Asset, AssetPayload};
use innvo_db::store::{AssetStore, StoreError};

/// Result of an update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The payload had no id and was stored as a new asset.
    Created(Asset),
    Updated(Asset),
}

impl SaveOutcome {
    pub fn asset(&self) -> &Asset {
        match self {
            Self::Created(asset) | Self::Updated(asset) => asset,
        }
    }
}

/// Asset operations over an [`AssetStore`].
#[derive(Clone)]
pub struct AssetService {
    store: Arc<dyn AssetStore>,
}

impl AssetService {
    pub fn new(store: Arc<dyn AssetStore>) -> Self {
        Self { store }
    }

    /// Create a new asset. A payload that declares its own id is rejected.
    pub async fn handle_create(&self, asset: AssetPayload) -> Result<Asset, StoreError> {
        tracing::debug!(name = %asset.fields.name, "Request to create asset");
        ensure_unassigned(asset.id)?;
        self.store.create(asset).await
    }

    /// Replace an existing asset.
    ///
    /// A payload without an id is handled exactly like
    /// [`handle_create`](Self::handle_create). An unknown id, including one
    /// deleted between the caller's read and this write, is not-found.
    pub async fn handle_update(&self, asset: AssetPayload) -> Result<SaveOutcome, StoreError> {
        if asset.id.is_none() {
            return self.handle_create(asset).await.map(SaveOutcome::Created);
        }
        tracing::debug!(asset_id = asset.id, "Request to update asset");
        self.store.update(asset).await.map(SaveOutcome::Updated)
    }

    /// One page of assets ordered by id, with the collection total.
    pub async fn handle_list(
        &self,
        page_number: i64,
        page_size: i64,
    ) -> Result<Page<Asset>, StoreError> {
        tracing::debug!(page_number, page_size, "Request to list assets");
        self.store.list(page_number, page_size).await
    }

    /// Fetch one asset; `Ok(None)` when it does not exist.
    pub async fn handle_get(&self, id: DbId) -> Result<Option<Asset>, StoreError> {
        tracing::debug!(asset_id = id, "Request to get asset");
        match self.store.get(id).await {
            Ok(asset) => Ok(Some(asset)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Hard-delete an asset. Deleting a missing asset is not-found.
    pub async fn handle_delete(&self, id: DbId) -> Result<(), StoreError> {
        tracing::debug!(asset_id = id, "Request to delete asset");
        self.store.delete(id).await
    }

    /// Whether the backing store is reachable.
    pub async fn store_healthy(&self) -> bool {
        match self.store.health_check().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Asset store health check failed");
                false
            }
        }
    }
}
