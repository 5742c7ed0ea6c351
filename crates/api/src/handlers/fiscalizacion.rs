//! Handlers for the `/fiscalizaciones` resource (roadside inspections).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use seguridad_core::error::CoreError;
use seguridad_core::identity::{require, validate_rut};
use seguridad_core::resources::{normalize_plate, validate_plate};
use seguridad_core::types::DbId;
use seguridad_db::models::fiscalizacion::{
    CreateFiscalizacion, Fiscalizacion, UpdateFiscalizacion,
};
use seguridad_db::repositories::{FiscalizacionRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Fiscalizacion",
        id,
    })
}

fn checked_plate(raw: &str) -> Result<String, CoreError> {
    let plate = normalize_plate(raw);
    validate_plate(&plate)?;
    Ok(plate)
}

/// POST /api/v1/fiscalizaciones
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Json(input): Json<CreateFiscalizacion>,
) -> AppResult<(StatusCode, Json<Fiscalizacion>)> {
    for (field, value) in [
        ("kind", &input.kind),
        ("detail", &input.detail),
        ("driver_first_name", &input.driver_first_name),
        ("driver_last_name", &input.driver_last_name),
        ("driver_rut", &input.driver_rut),
    ] {
        require(field, value)?;
    }
    validate_rut(&input.driver_rut)?;
    let vehicle_plate = checked_plate(&input.vehicle_plate)?;

    let user_id = input.user_id.unwrap_or(staff.user_id);
    if UserRepo::find_by_id(&state.pool, user_id).await?.is_none() {
        return Err(AppError::Core(CoreError::unknown_reference("user")));
    }
    let inspected_at = input.inspected_at.unwrap_or_else(Utc::now);

    let input = CreateFiscalizacion {
        vehicle_plate,
        ..input
    };
    let fiscalizacion =
        FiscalizacionRepo::create(&state.pool, user_id, inspected_at, &input).await?;
    tracing::info!(
        fiscalizacion_id = fiscalizacion.id,
        plate = %fiscalizacion.vehicle_plate,
        "Inspection recorded"
    );
    Ok((StatusCode::CREATED, Json(fiscalizacion)))
}

/// GET /api/v1/fiscalizaciones
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<Vec<Fiscalizacion>>> {
    Ok(Json(FiscalizacionRepo::list(&state.pool).await?))
}

/// GET /api/v1/fiscalizaciones/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Fiscalizacion>> {
    let fiscalizacion = FiscalizacionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(fiscalizacion))
}

/// PUT /api/v1/fiscalizaciones/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFiscalizacion>,
) -> AppResult<Json<Fiscalizacion>> {
    if let Some(rut) = input.driver_rut.as_deref() {
        validate_rut(rut)?;
    }
    let vehicle_plate = input
        .vehicle_plate
        .as_deref()
        .map(checked_plate)
        .transpose()?;

    let input = UpdateFiscalizacion {
        vehicle_plate,
        ..input
    };
    let fiscalizacion = FiscalizacionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(fiscalizacion))
}

/// DELETE /api/v1/fiscalizaciones/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if FiscalizacionRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
