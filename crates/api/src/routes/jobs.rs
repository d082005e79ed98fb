use axum::routing::get;
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// Job trigger routes, relative to `/api`.
///
/// ```text
/// GET    /runJob          -> run_job
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/runJob", get(jobs::run_job))
}
