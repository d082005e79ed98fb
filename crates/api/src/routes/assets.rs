//! Route definitions for the asset resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::assets;
use crate::state::AppState;

/// Asset routes, relative to `/api`.
///
/// ```text
/// GET    /assets          -> list_assets
/// POST   /assets          -> create_asset
/// PUT    /assets          -> update_asset
/// GET    /assets/{id}     -> get_asset
/// DELETE /assets/{id}     -> delete_asset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/assets",
            get(assets::list_assets)
                .post(assets::create_asset)
                .put(assets::update_asset),
        )
        .route(
            "/assets/{id}",
            get(assets::get_asset).delete(assets::delete_asset),
        )
}
