//! Handlers for the asset resource.
//!
//! Asset bodies are returned bare (no `data` envelope). Lifecycle events are
//! announced through alert headers and lists carry pagination headers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use innvo_core::assets::ENTITY_NAME;
use innvo_core::error::CoreError;
use innvo_core::types::DbId;
use innvo_db::models::asset::{Asset, AssetPayload};

use crate::error::{AppError, AppResult};
use crate::query::PageParams;
use crate::response::{entity_alert_headers, location_header, pagination_headers, EntityAction};
use crate::service::SaveOutcome;
use crate::state::AppState;

/// Key used in alert headers (`innvoApp.asset.created`).
const ALERT_ENTITY: &str = "asset";

const BASE_PATH: &str = "/api/assets";

/// 201 response for a freshly stored asset.
fn created_response(asset: Asset) -> AppResult<impl IntoResponse> {
    let mut headers = entity_alert_headers(ALERT_ENTITY, EntityAction::Created, asset.id)?;
    location_header(&mut headers, format!("{BASE_PATH}/{}", asset.id))?;
    Ok((StatusCode::CREATED, headers, Json(asset)))
}

/// POST /api/assets
pub async fn create_asset(
    State(state): State<AppState>,
    body: Result<Json<AssetPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = body?;
    let asset = state.assets.handle_create(input).await?;

    tracing::info!(asset_id = asset.id, name = %asset.fields.name, "Asset created");

    created_response(asset)
}

/// PUT /api/assets
///
/// Full replace. A body without `id` is stored as a new asset and answered
/// with 201.
pub async fn update_asset(
    State(state): State<AppState>,
    body: Result<Json<AssetPayload>, JsonRejection>,
) -> AppResult<axum::response::Response> {
    let Json(input) = body?;
    match state.assets.handle_update(input).await? {
        SaveOutcome::Created(asset) => {
            tracing::info!(asset_id = asset.id, "Asset created through update");
            Ok(created_response(asset)?.into_response())
        }
        SaveOutcome::Updated(asset) => {
            tracing::info!(asset_id = asset.id, "Asset updated");
            let headers = entity_alert_headers(ALERT_ENTITY, EntityAction::Updated, asset.id)?;
            Ok((headers, Json(asset)).into_response())
        }
    }
}

/// GET /api/assets?pageNumber=&pageSize=
pub async fn list_assets(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = state
        .assets
        .handle_list(params.page_number(), params.page_size())
        .await?;
    let headers = pagination_headers(&page, BASE_PATH)?;

    Ok((headers, Json(page.items)))
}

/// GET /api/assets/{id}
pub async fn get_asset(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let asset = state
        .assets
        .handle_get(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: ENTITY_NAME,
            id,
        }))?;

    Ok(Json(asset))
}

/// DELETE /api/assets/{id}
pub async fn delete_asset(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    state.assets.handle_delete(id).await?;

    tracing::info!(asset_id = id, "Asset deleted");

    let headers = entity_alert_headers(ALERT_ENTITY, EntityAction::Deleted, id)?;
    Ok((StatusCode::OK, headers))
}
