pub mod assets;
pub mod health;
pub mod jobs;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` routes that run under the HTTP request timeout.
///
/// Route hierarchy:
///
/// ```text
/// /assets                  list, create, update
/// /assets/{id}             get, delete
/// ```
///
/// `/runJob` is mounted separately by the router builder (see
/// [`jobs::router`]) because job runs are bounded by their own timeout.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(assets::router())
}
