//! Route definitions for the classification hierarchy.
//!
//! Each level gets its own router; reads are open to staff and writes
//! are admin only (enforced by handler extractors).

use axum::routing::get;
use axum::Router;

use crate::handlers::{familia, grupo, requerimiento, subgrupo};
use crate::state::AppState;

/// Routes mounted at `/familias`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete (409 while grupos remain)
/// ```
pub fn familias_router() -> Router<AppState> {
    Router::new()
        .route("/", get(familia::list).post(familia::create))
        .route(
            "/{id}",
            get(familia::get_by_id)
                .put(familia::update)
                .delete(familia::delete),
        )
}

/// Routes mounted at `/grupos`. `GET /?familia_id=` filters by parent.
pub fn grupos_router() -> Router<AppState> {
    Router::new()
        .route("/", get(grupo::list).post(grupo::create))
        .route(
            "/{id}",
            get(grupo::get_by_id).put(grupo::update).delete(grupo::delete),
        )
}

/// Routes mounted at `/subgrupos`. `GET /?grupo_id=` filters by parent.
pub fn subgrupos_router() -> Router<AppState> {
    Router::new()
        .route("/", get(subgrupo::list).post(subgrupo::create))
        .route(
            "/{id}",
            get(subgrupo::get_by_id)
                .put(subgrupo::update)
                .delete(subgrupo::delete),
        )
}

/// Routes mounted at `/requerimientos`.
///
/// ```text
/// GET    /            -> list (?subgrupo_id=)
/// POST   /            -> create
/// GET    /{id}        -> get_by_id
/// PUT    /{id}        -> update
/// DELETE /{id}        -> delete
/// GET    /{id}/path   -> get_path (familia > grupo > subgrupo > requerimiento)
/// ```
pub fn requerimientos_router() -> Router<AppState> {
    Router::new()
        .route("/", get(requerimiento::list).post(requerimiento::create))
        .route(
            "/{id}",
            get(requerimiento::get_by_id)
                .put(requerimiento::update)
                .delete(requerimiento::delete),
        )
        .route("/{id}/path", get(requerimiento::get_path))
}
