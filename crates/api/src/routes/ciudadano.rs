//! Route definitions for the `/ciudadanos` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::ciudadano;
use crate::state::AppState;

/// Routes mounted at `/ciudadanos`.
///
/// ```text
/// POST /register  -> register (public)
/// GET  /          -> list
/// GET  /{id}      -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(ciudadano::register))
        .route("/", get(ciudadano::list))
        .route("/{id}", get(ciudadano::get_by_id))
}
