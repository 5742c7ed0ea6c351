//! Route definitions for the `/denuncias` resource and its dispatch
//! records.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{denuncia, dispatch};
use crate::state::AppState;

/// Routes mounted at `/denuncias`.
///
/// ```text
/// GET    /                                    -> list (?status_id=&citizen_id=&requerimiento_id=)
/// POST   /                                    -> create
/// GET    /{id}                                -> get_by_id
/// PUT    /{id}                                -> update
/// DELETE /{id}                                -> delete
///
/// GET    /{id}/moviles                        -> dispatch::list_vehicles
/// POST   /{id}/moviles                        -> dispatch::create_vehicle
/// DELETE /{id}/moviles/{movil_id}             -> dispatch::delete_vehicle
///
/// GET    /{id}/derivaciones                   -> dispatch::list_referrals
/// POST   /{id}/derivaciones                   -> dispatch::create_referral
/// DELETE /{id}/derivaciones/{derivacion_id}   -> dispatch::delete_referral
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(denuncia::list).post(denuncia::create))
        .route(
            "/{id}",
            get(denuncia::get_by_id)
                .put(denuncia::update)
                .delete(denuncia::delete),
        )
        .route(
            "/{id}/moviles",
            get(dispatch::list_vehicles).post(dispatch::create_vehicle),
        )
        .route(
            "/{id}/moviles/{movil_id}",
            delete(dispatch::delete_vehicle),
        )
        .route(
            "/{id}/derivaciones",
            get(dispatch::list_referrals).post(dispatch::create_referral),
        )
        .route(
            "/{id}/derivaciones/{derivacion_id}",
            delete(dispatch::delete_referral),
        )
}
