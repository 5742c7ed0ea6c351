//! Route definitions for the `/solicitudes` resource (intake requests).

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::intake;
use crate::state::AppState;

/// Routes mounted at `/solicitudes`.
///
/// ```text
/// GET    /ciudadanos                   -> list_citizen_requests (?status_id=)
/// POST   /ciudadanos                   -> create_citizen_request
/// GET    /ciudadanos/{id}              -> get_citizen_request
/// PUT    /ciudadanos/{id}              -> update_citizen_request
/// DELETE /ciudadanos/{id}              -> delete_citizen_request
/// GET    /ciudadanos/{id}/documentos   -> list_documents
/// POST   /ciudadanos/{id}/documentos   -> create_document
/// DELETE /documentos/{id}              -> delete_document
///
/// GET    /trabajadores                 -> list_worker_requests (?status_id=)
/// POST   /trabajadores                 -> create_worker_request
/// GET    /trabajadores/{id}            -> get_worker_request
/// PUT    /trabajadores/{id}            -> update_worker_request
/// DELETE /trabajadores/{id}            -> delete_worker_request
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/ciudadanos",
            get(intake::list_citizen_requests).post(intake::create_citizen_request),
        )
        .route(
            "/ciudadanos/{id}",
            get(intake::get_citizen_request)
                .put(intake::update_citizen_request)
                .delete(intake::delete_citizen_request),
        )
        .route(
            "/ciudadanos/{id}/documentos",
            get(intake::list_documents).post(intake::create_document),
        )
        .route("/documentos/{id}", delete(intake::delete_document))
        .route(
            "/trabajadores",
            get(intake::list_worker_requests).post(intake::create_worker_request),
        )
        .route(
            "/trabajadores/{id}",
            get(intake::get_worker_request)
                .put(intake::update_worker_request)
                .delete(intake::delete_worker_request),
        )
}
