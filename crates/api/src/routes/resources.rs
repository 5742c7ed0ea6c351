//! Route definitions for field resources: vehicles, radios, their
//! assignments to staff, and the external emergency services.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{assignment, emergency_service, radio, vehicle, vehicle_type};
use crate::state::AppState;

/// Routes mounted at `/vehicle-types`.
pub fn vehicle_types_router() -> Router<AppState> {
    Router::new().route("/", get(vehicle_type::list).post(vehicle_type::create))
}

/// Routes mounted at `/vehiculos`.
pub fn vehiculos_router() -> Router<AppState> {
    Router::new()
        .route("/", get(vehicle::list).post(vehicle::create))
        .route(
            "/{id}",
            get(vehicle::get_by_id)
                .put(vehicle::update)
                .delete(vehicle::delete),
        )
}

/// Routes mounted at `/radios`.
pub fn radios_router() -> Router<AppState> {
    Router::new()
        .route("/", get(radio::list).post(radio::create))
        .route(
            "/{id}",
            get(radio::get_by_id).put(radio::update).delete(radio::delete),
        )
}

/// Routes mounted at `/asignaciones`.
///
/// ```text
/// GET    /vehiculos              -> list_vehicles (?user_id=&vehicle_id=)
/// POST   /vehiculos              -> create_vehicle
/// GET    /vehiculos/{id}         -> get_vehicle
/// PUT    /vehiculos/{id}         -> update_vehicle (closing adds distance to the odometer)
/// DELETE /vehiculos/{id}         -> delete_vehicle
///
/// GET    /radios                 -> list_radios (?user_id=&radio_id=)
/// POST   /radios                 -> create_radio
/// GET    /radios/{id}            -> get_radio
/// DELETE /radios/{id}            -> delete_radio
/// POST   /radios/{id}/return     -> return_radio
/// ```
pub fn asignaciones_router() -> Router<AppState> {
    Router::new()
        .route(
            "/vehiculos",
            get(assignment::list_vehicles).post(assignment::create_vehicle),
        )
        .route(
            "/vehiculos/{id}",
            get(assignment::get_vehicle)
                .put(assignment::update_vehicle)
                .delete(assignment::delete_vehicle),
        )
        .route(
            "/radios",
            get(assignment::list_radios).post(assignment::create_radio),
        )
        .route(
            "/radios/{id}",
            get(assignment::get_radio).delete(assignment::delete_radio),
        )
        .route("/radios/{id}/return", post(assignment::return_radio))
}

/// Routes mounted at `/servicios-emergencia`.
pub fn emergency_services_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(emergency_service::list).post(emergency_service::create),
        )
        .route(
            "/{id}",
            get(emergency_service::get_by_id)
                .put(emergency_service::update)
                .delete(emergency_service::delete),
        )
}
