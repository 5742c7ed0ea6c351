//! Route definitions for the `/admin` pages.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the admin role (enforced by handler extractors).
///
/// ```text
/// GET /dashboard       -> dashboard
/// GET /usuarios        -> usuarios
/// GET /requerimientos  -> requerimientos
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/usuarios", get(admin::usuarios))
        .route("/requerimientos", get(admin::requerimientos))
}
