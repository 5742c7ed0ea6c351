//! Route definitions for field operations: `/fiscalizaciones`, `/rutas`
//! and `/alertas`.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{fiscalizacion, patrol};
use crate::state::AppState;

/// Routes mounted at `/fiscalizaciones`.
pub fn fiscalizaciones_router() -> Router<AppState> {
    Router::new()
        .route("/", get(fiscalizacion::list).post(fiscalizacion::create))
        .route(
            "/{id}",
            get(fiscalizacion::get_by_id)
                .put(fiscalizacion::update)
                .delete(fiscalizacion::delete),
        )
}

/// Routes mounted at `/rutas`.
pub fn rutas_router() -> Router<AppState> {
    Router::new()
        .route("/", get(patrol::list_routes).post(patrol::create_route))
        .route("/{id}", delete(patrol::delete_route))
}

/// Routes mounted at `/alertas`.
pub fn alertas_router() -> Router<AppState> {
    Router::new()
        .route("/", get(patrol::list_alerts).post(patrol::create_alert))
        .route("/{id}", delete(patrol::delete_alert))
}
