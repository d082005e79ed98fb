//! Asset model and request payload.
//!
//! Field values are opaque text: nothing below the HTTP layer interprets
//! them. JSON uses camelCase (`nameShort`, `lastModifiedBy`).

use innvo_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The descriptive columns of an asset. Only `name` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetFields {
    pub name: String,
    #[serde(default)]
    pub name_short: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub last_modified_by: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A row from the `assets` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Asset {
    pub id: DbId,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub fields: AssetFields,
}

/// Request body for create and update.
///
/// `id` must be absent on create and present on update; the service layer
/// enforces which.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPayload {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(flatten)]
    pub fields: AssetFields,
}

impl AssetPayload {
    /// A payload without an id, as sent to create.
    pub fn new(fields: AssetFields) -> Self {
        Self { id: None, fields }
    }

    /// A payload targeting an existing record, as sent to update.
    pub fn with_id(id: DbId, fields: AssetFields) -> Self {
        Self {
            id: Some(id),
            fields,
        }
    }
}

impl From<Asset> for AssetPayload {
    fn from(asset: Asset) -> Self {
        Self::with_id(asset.id, asset.fields)
    }
}
