use std::collections::BTreeMap;

use innvo_core::assets::{ensure_unassigned, require_assigned};
use innvo_core::pagination::{Page, PageRequest};
use innvo_core::types::DbId;
use tokio::sync::RwLock;

use super::{not_found, AssetStore, StoreError};
use crate::models::asset::{Asset, AssetPayload};

#[derive(Default)]
struct Inner {
    last_id: DbId,
    records: BTreeMap<DbId, Asset>,
}

/// [`AssetStore`] kept in process memory.
///
/// Ids start at 1 and are never reused, even after deletes, matching a
/// BIGSERIAL column.
#[derive(Default)]
pub struct InMemoryAssetStore {
    inner: RwLock<Inner>,
}

impl InMemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AssetStore for InMemoryAssetStore {
    async fn create(&self, asset: AssetPayload) -> Result<Asset, StoreError> {
        ensure_unassigned(asset.id)?;
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let created = Asset {
            id: inner.last_id,
            fields: asset.fields,
        };
        inner.records.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, asset: AssetPayload) -> Result<Asset, StoreError> {
        let id = require_assigned(asset.id)?;
        let mut inner = self.inner.write().await;
        let stored = inner.records.get_mut(&id).ok_or_else(|| not_found(id))?;
        stored.fields = asset.fields;
        Ok(stored.clone())
    }

    async fn get(&self, id: DbId) -> Result<Asset, StoreError> {
        self.inner
            .read()
            .await
            .records
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn list(&self, page_number: i64, page_size: i64) -> Result<Page<Asset>, StoreError> {
        let request = PageRequest::new(page_number, page_size)?;
        let inner = self.inner.read().await;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(request.size()).unwrap_or(usize::MAX);
        let items = inner
            .records
            .values()
            .skip(offset)
            .take(size)
            .cloned()
            .collect();
        Ok(Page::new(items, inner.records.len() as i64, request))
    }

    async fn delete(&self, id: DbId) -> Result<(), StoreError> {
        match self.inner.write().await.records.remove(&id) {
            Some(_) => Ok(()),
            None => Err(not_found(id)),
        }
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
