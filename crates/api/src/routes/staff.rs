//! Route definitions for municipal staff: `/usuarios`, `/roles` and
//! `/turnos`.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{role, turno, user};
use crate::state::AppState;

/// Routes mounted at `/usuarios`.
///
/// ```text
/// GET    /search?q=  -> search (staff)
/// GET    /           -> list (admin)
/// POST   /           -> create (admin)
/// GET    /{id}       -> get_by_id (admin)
/// PUT    /{id}       -> update (admin)
/// DELETE /{id}       -> delete (admin, staff roles only)
/// ```
pub fn usuarios_router() -> Router<AppState> {
    Router::new()
        .route("/search", get(user::search))
        .route("/", get(user::list).post(user::create))
        .route(
            "/{id}",
            get(user::get_by_id).put(user::update).delete(user::delete),
        )
}

/// Routes mounted at `/roles`.
pub fn roles_router() -> Router<AppState> {
    Router::new()
        .route("/", get(role::list).post(role::create))
        .route("/{id}", delete(role::delete))
}

/// Routes mounted at `/turnos`.
pub fn turnos_router() -> Router<AppState> {
    Router::new()
        .route("/", get(turno::list).post(turno::create))
        .route(
            "/{id}",
            get(turno::get_by_id).put(turno::update).delete(turno::delete),
        )
}
