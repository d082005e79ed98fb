//! Repository for the `assets` table.

use innvo_core::types::DbId;
use sqlx::PgPool;

use crate::models::asset::{Asset, AssetFields};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, name_short, description, domain, last_modified_by, status";

/// Provides CRUD operations for assets.
pub struct AssetRepo;

impl AssetRepo {
    /// Insert a new asset, returning the created row with its assigned id.
    pub async fn create(pool: &PgPool, input: &AssetFields) -> Result<Asset, sqlx::Error> {
        let query = format!(
            "INSERT INTO assets (name, name_short, description, domain, last_modified_by, status)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(&input.name)
            .bind(&input.name_short)
            .bind(&input.description)
            .bind(&input.domain)
            .bind(&input.last_modified_by)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find an asset by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE id = $1");
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of assets ordered by ID ascending.
    pub async fn list_page(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets ORDER BY id ASC LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Asset>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count all assets.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM assets")
            .fetch_one(pool)
            .await
    }

    /// Replace every descriptive column of an asset.
    ///
    /// Absent optional fields are written as NULL; this is a full replace,
    /// not a patch. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &AssetFields,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET
                name = $2,
                name_short = $3,
                description = $4,
                domain = $5,
                last_modified_by = $6,
                status = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.name_short)
            .bind(&input.description)
            .bind(&input.domain)
            .bind(&input.last_modified_by)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete an asset by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
