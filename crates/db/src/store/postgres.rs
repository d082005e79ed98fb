use innvo_core::assets::{ensure_unassigned, require_assigned};
use innvo_core::pagination::{Page, PageRequest};
use innvo_core::types::DbId;

use super::{not_found, AssetStore, StoreError};
use crate::models::asset::{Asset, AssetPayload};
use crate::repositories::AssetRepo;
use crate::DbPool;

/// [`AssetStore`] backed by the `assets` table.
#[derive(Clone)]
pub struct PgAssetStore {
    pool: DbPool,
}

impl PgAssetStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AssetStore for PgAssetStore {
    async fn create(&self, asset: AssetPayload) -> Result<Asset, StoreError> {
        ensure_unassigned(asset.id)?;
        Ok(AssetRepo::create(&self.pool, &asset.fields).await?)
    }

    async fn update(&self, asset: AssetPayload) -> Result<Asset, StoreError> {
        let id = require_assigned(asset.id)?;
        // Single UPDATE ... RETURNING: a row deleted concurrently yields None.
        AssetRepo::update(&self.pool, id, &asset.fields)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn get(&self, id: DbId) -> Result<Asset, StoreError> {
        AssetRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn list(&self, page_number: i64, page_size: i64) -> Result<Page<Asset>, StoreError> {
        let request = PageRequest::new(page_number, page_size)?;
        let total = AssetRepo::count(&self.pool).await?;
        let items = AssetRepo::list_page(&self.pool, request.size(), request.offset()).await?;
        Ok(Page::new(items, total, request))
    }

    async fn delete(&self, id: DbId) -> Result<(), StoreError> {
        if AssetRepo::delete(&self.pool, id).await? {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
