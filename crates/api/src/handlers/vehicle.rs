//! Handlers for the `/vehiculos` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use seguridad_core::error::CoreError;
use seguridad_core::identity::require;
use seguridad_core::resources::{normalize_plate, validate_plate};
use seguridad_core::status::{ResourceStatus, StatusId};
use seguridad_core::types::DbId;
use seguridad_db::models::resource::{CreateVehicle, UpdateVehicle, Vehicle};
use seguridad_db::repositories::{VehicleRepo, VehicleTypeRepo};

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::query::StatusFilter;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Vehiculo",
        id,
    })
}

/// POST /api/v1/vehiculos
///
/// Plates are stored normalized (`ab-cd 12` becomes `ABCD12`).
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateVehicle>,
) -> AppResult<(StatusCode, Json<Vehicle>)> {
    let plate = normalize_plate(&input.plate);
    validate_plate(&plate)?;
    require("make", &input.make)?;
    require("model", &input.model)?;
    require("code", &input.code)?;
    let vehicle_type_id = input
        .vehicle_type_id
        .ok_or_else(|| CoreError::missing_field("vehicle_type_id"))?;
    ensure_vehicle_type_exists(&state, vehicle_type_id).await?;
    validate_status(input.status_id)?;
    validate_odometer(input.odometer_total)?;

    let vehicle = VehicleRepo::create(
        &state.pool,
        &CreateVehicle {
            plate,
            make: input.make.trim().to_string(),
            model: input.model.trim().to_string(),
            code: input.code.trim().to_string(),
            ..input
        },
    )
    .await?;
    tracing::info!(vehicle_id = vehicle.id, plate = %vehicle.plate, "Vehicle registered");
    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// GET /api/v1/vehiculos?status_id=
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(filter): Query<StatusFilter>,
) -> AppResult<Json<Vec<Vehicle>>> {
    validate_status(filter.status_id)?;
    Ok(Json(VehicleRepo::list(&state.pool, filter.status_id).await?))
}

/// GET /api/v1/vehiculos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vehicle>> {
    let vehicle = VehicleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(vehicle))
}

/// PUT /api/v1/vehiculos/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVehicle>,
) -> AppResult<Json<Vehicle>> {
    let plate = match input.plate.as_deref() {
        Some(raw) => {
            let plate = normalize_plate(raw);
            validate_plate(&plate)?;
            Some(plate)
        }
        None => None,
    };
    for (field, value) in [("make", &input.make), ("model", &input.model), ("code", &input.code)] {
        if let Some(value) = value {
            require(field, value)?;
        }
    }
    if let Some(vehicle_type_id) = input.vehicle_type_id {
        ensure_vehicle_type_exists(&state, vehicle_type_id).await?;
    }
    validate_status(input.status_id)?;
    validate_odometer(input.odometer_total)?;

    let trimmed = |v: Option<String>| v.map(|s| s.trim().to_string());
    let update = UpdateVehicle {
        plate,
        make: trimmed(input.make),
        model: trimmed(input.model),
        code: trimmed(input.code),
        ..input
    };
    let vehicle = VehicleRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(vehicle))
}

/// DELETE /api/v1/vehiculos/{id}
///
/// 409 once the vehicle has been dispatched to a denuncia.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let dispatches = VehicleRepo::count_dispatches(&state.pool, id).await?;
    if dispatches > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot delete the vehicle because it was dispatched to {dispatches} denuncias"
        ))));
    }
    if VehicleRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

async fn ensure_vehicle_type_exists(state: &AppState, id: DbId) -> AppResult<()> {
    if VehicleTypeRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::unknown_reference("vehicle type")));
    }
    Ok(())
}

fn validate_status(status_id: Option<StatusId>) -> Result<(), CoreError> {
    status_id.map(ResourceStatus::from_id).transpose()?;
    Ok(())
}

fn validate_odometer(odometer_total: Option<i32>) -> Result<(), CoreError> {
    if matches!(odometer_total, Some(km) if km < 0) {
        return Err(CoreError::Validation(
            "odometer_total cannot be negative".into(),
        ));
    }
    Ok(())
}
