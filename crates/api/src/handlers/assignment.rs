//! Handlers for `/asignaciones/vehiculos` and `/asignaciones/radios`
//! (resource checkouts).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::Utc;
use seguridad_core::error::CoreError;
use seguridad_core::types::DbId;
use seguridad_db::models::assignment::{
    CreateRadioAssignment, CreateVehicleAssignment, RadioAssignment, UpdateVehicleAssignment,
    VehicleAssignment,
};
use seguridad_db::repositories::{RadioAssignmentRepo, RadioRepo, UserRepo, VehicleAssignmentRepo};

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::RequireStaff;
use crate::query::{RadioAssignmentFilter, VehicleAssignmentFilter};
use crate::state::AppState;

fn vehicle_assignment_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "AsignacionVehiculo",
        id,
    })
}

fn radio_assignment_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "AsignacionRadio",
        id,
    })
}

async fn ensure_user_exists(state: &AppState, user_id: DbId) -> AppResult<()> {
    if UserRepo::find_by_id(&state.pool, user_id).await?.is_none() {
        return Err(AppError::Core(CoreError::unknown_reference("user")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Vehicles
// ---------------------------------------------------------------------------

/// POST /api/v1/asignaciones/vehiculos
///
/// `assigned_on` defaults to today (UTC); `odometer_start` to the
/// vehicle's odometer.
pub async fn create_vehicle(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Json(input): Json<CreateVehicleAssignment>,
) -> AppResult<(StatusCode, Json<VehicleAssignment>)> {
    let user_id = input
        .user_id
        .ok_or_else(|| CoreError::missing_field("user_id"))?;
    let vehicle_id = input
        .vehicle_id
        .ok_or_else(|| CoreError::missing_field("vehicle_id"))?;
    ensure_user_exists(&state, user_id).await?;

    let assigned_on = input.assigned_on.unwrap_or_else(|| Utc::now().date_naive());
    let assignment = VehicleAssignmentRepo::create(
        &state.pool,
        user_id,
        vehicle_id,
        assigned_on,
        input.odometer_start,
    )
    .await?;
    tracing::info!(
        assignment_id = assignment.id,
        user_id,
        vehicle_id,
        "Vehicle checked out"
    );
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// GET /api/v1/asignaciones/vehiculos?user_id=&vehicle_id=
pub async fn list_vehicles(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(filter): Query<VehicleAssignmentFilter>,
) -> AppResult<Json<Vec<VehicleAssignment>>> {
    let assignments =
        VehicleAssignmentRepo::list(&state.pool, filter.user_id, filter.vehicle_id).await?;
    Ok(Json(assignments))
}

/// GET /api/v1/asignaciones/vehiculos/{id}
pub async fn get_vehicle(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<VehicleAssignment>> {
    let assignment = VehicleAssignmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| vehicle_assignment_not_found(id))?;
    Ok(Json(assignment))
}

/// PUT /api/v1/asignaciones/vehiculos/{id}
///
/// Setting `odometer_end` closes the trip and adds the distance to the
/// vehicle's odometer.
pub async fn update_vehicle(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVehicleAssignment>,
) -> AppResult<Json<VehicleAssignment>> {
    let assignment = VehicleAssignmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| vehicle_assignment_not_found(id))?;
    Ok(Json(assignment))
}

/// DELETE /api/v1/asignaciones/vehiculos/{id}
pub async fn delete_vehicle(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if VehicleAssignmentRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(vehicle_assignment_not_found(id))
    }
}

// ---------------------------------------------------------------------------
// Radios
// ---------------------------------------------------------------------------

/// POST /api/v1/asignaciones/radios
pub async fn create_radio(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Json(input): Json<CreateRadioAssignment>,
) -> AppResult<(StatusCode, Json<RadioAssignment>)> {
    let user_id = input
        .user_id
        .ok_or_else(|| CoreError::missing_field("user_id"))?;
    let radio_id = input
        .radio_id
        .ok_or_else(|| CoreError::missing_field("radio_id"))?;
    ensure_user_exists(&state, user_id).await?;
    if RadioRepo::find_by_id(&state.pool, radio_id).await?.is_none() {
        return Err(AppError::Core(CoreError::unknown_reference("radio")));
    }

    let assigned_on = input.assigned_on.unwrap_or_else(|| Utc::now().date_naive());
    let assignment = RadioAssignmentRepo::create(&state.pool, user_id, radio_id, assigned_on).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// GET /api/v1/asignaciones/radios?user_id=&radio_id=
pub async fn list_radios(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(filter): Query<RadioAssignmentFilter>,
) -> AppResult<Json<Vec<RadioAssignment>>> {
    let assignments =
        RadioAssignmentRepo::list(&state.pool, filter.user_id, filter.radio_id).await?;
    Ok(Json(assignments))
}

/// GET /api/v1/asignaciones/radios/{id}
pub async fn get_radio(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<RadioAssignment>> {
    let assignment = RadioAssignmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| radio_assignment_not_found(id))?;
    Ok(Json(assignment))
}

/// POST /api/v1/asignaciones/radios/{id}/return
///
/// Idempotent: a second return keeps the first timestamp.
pub async fn return_radio(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<RadioAssignment>> {
    let assignment = RadioAssignmentRepo::mark_returned(&state.pool, id)
        .await?
        .ok_or_else(|| radio_assignment_not_found(id))?;
    Ok(Json(assignment))
}

/// DELETE /api/v1/asignaciones/radios/{id}
pub async fn delete_radio(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if RadioAssignmentRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(radio_assignment_not_found(id))
    }
}
