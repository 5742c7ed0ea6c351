//! Handlers for the dispatch records nested under a denuncia:
//! `/denuncias/{id}/moviles` and `/denuncias/{id}/derivaciones`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use seguridad_core::denuncia::ReferralKind;
use seguridad_core::error::CoreError;
use seguridad_core::types::DbId;
use seguridad_db::models::dispatch::{
    CreateDenunciaReferral, CreateDenunciaVehicle, DenunciaReferral, DenunciaVehicle,
};
use seguridad_db::repositories::{
    DenunciaReferralRepo, DenunciaRepo, DenunciaVehicleRepo, EmergencyServiceRepo, NewReferral,
    UserRepo, VehicleRepo,
};

use super::denuncia::not_found as denuncia_not_found;
use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

async fn ensure_denuncia_exists(state: &AppState, denuncia_id: DbId) -> AppResult<()> {
    if DenunciaRepo::find_by_id(&state.pool, denuncia_id)
        .await?
        .is_none()
    {
        return Err(denuncia_not_found(denuncia_id));
    }
    Ok(())
}

async fn ensure_driver_exists(state: &AppState, driver_id: DbId) -> AppResult<()> {
    if UserRepo::find_by_id(&state.pool, driver_id).await?.is_none() {
        return Err(AppError::Core(CoreError::unknown_reference("driver")));
    }
    Ok(())
}

/// Highest explicit `assignment_order`. Keeps the next automatic order
/// (`MAX + 1`) inside `int4`.
pub const MAX_ASSIGNMENT_ORDER: i32 = 10_000;

fn validate_order(order: Option<i32>) -> Result<(), CoreError> {
    match order {
        Some(o) if o < 1 => Err(CoreError::Validation(
            "assignment_order must be at least 1".into(),
        )),
        Some(o) if o > MAX_ASSIGNMENT_ORDER => Err(CoreError::Validation(format!(
            "assignment_order must be at most {MAX_ASSIGNMENT_ORDER}"
        ))),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Vehicles (moviles)
// ---------------------------------------------------------------------------

/// GET /api/v1/denuncias/{id}/moviles
pub async fn list_vehicles(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(denuncia_id): Path<DbId>,
) -> AppResult<Json<Vec<DenunciaVehicle>>> {
    ensure_denuncia_exists(&state, denuncia_id).await?;
    let dispatches = DenunciaVehicleRepo::list_for_denuncia(&state.pool, denuncia_id).await?;
    Ok(Json(dispatches))
}

/// POST /api/v1/denuncias/{id}/moviles
///
/// A taken `assignment_order` is a 409; omitting it appends.
pub async fn create_vehicle(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(denuncia_id): Path<DbId>,
    Json(input): Json<CreateDenunciaVehicle>,
) -> AppResult<(StatusCode, Json<DenunciaVehicle>)> {
    let vehicle_id = input
        .vehicle_id
        .ok_or_else(|| CoreError::missing_field("vehicle_id"))?;
    let driver_id = input
        .driver_id
        .ok_or_else(|| CoreError::missing_field("driver_id"))?;
    validate_order(input.assignment_order)?;

    if VehicleRepo::find_by_id(&state.pool, vehicle_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::unknown_reference("vehicle")));
    }
    ensure_driver_exists(&state, driver_id).await?;

    let dispatch = DenunciaVehicleRepo::create(
        &state.pool,
        denuncia_id,
        input.assignment_order,
        input.assigned_at.unwrap_or_else(Utc::now),
        input.notes.as_deref(),
        vehicle_id,
        driver_id,
    )
    .await?;
    tracing::info!(
        denuncia_id,
        vehicle_id,
        order = dispatch.assignment_order,
        "Vehicle dispatched"
    );
    Ok((StatusCode::CREATED, Json(dispatch)))
}

/// DELETE /api/v1/denuncias/{id}/moviles/{movil_id}
pub async fn delete_vehicle(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path((denuncia_id, movil_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if DenunciaVehicleRepo::delete(&state.pool, denuncia_id, movil_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "MovilDenuncia",
            id: movil_id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Referrals (derivaciones)
// ---------------------------------------------------------------------------

/// GET /api/v1/denuncias/{id}/derivaciones
pub async fn list_referrals(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(denuncia_id): Path<DbId>,
) -> AppResult<Json<Vec<DenunciaReferral>>> {
    ensure_denuncia_exists(&state, denuncia_id).await?;
    let referrals = DenunciaReferralRepo::list_for_denuncia(&state.pool, denuncia_id).await?;
    Ok(Json(referrals))
}

/// POST /api/v1/denuncias/{id}/derivaciones
///
/// Emergency referrals must name the emergency service.
pub async fn create_referral(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(denuncia_id): Path<DbId>,
    Json(input): Json<CreateDenunciaReferral>,
) -> AppResult<(StatusCode, Json<DenunciaReferral>)> {
    if input.kind.trim().is_empty() {
        return Err(CoreError::missing_field("kind").into());
    }
    let kind = ReferralKind::parse(input.kind.trim())?;
    validate_order(input.assignment_order)?;

    match input.emergency_service_id {
        Some(service_id) => {
            if EmergencyServiceRepo::find_by_id(&state.pool, service_id)
                .await?
                .is_none()
            {
                return Err(AppError::Core(CoreError::unknown_reference("emergency service")));
            }
        }
        None if kind.requires_service() => {
            return Err(CoreError::missing_field("emergency_service_id").into());
        }
        None => {}
    }
    if let Some(driver_id) = input.driver_id {
        ensure_driver_exists(&state, driver_id).await?;
    }

    let referral = DenunciaReferralRepo::create(
        &state.pool,
        denuncia_id,
        &NewReferral {
            assignment_order: input.assignment_order,
            kind,
            referred_at: input.referred_at.unwrap_or_else(Utc::now),
            notes: input.notes.as_deref(),
            emergency_service_id: input.emergency_service_id,
            driver_id: input.driver_id,
        },
    )
    .await?;
    tracing::info!(denuncia_id, kind = kind.as_str(), "Denuncia referred");
    Ok((StatusCode::CREATED, Json(referral)))
}

/// DELETE /api/v1/denuncias/{id}/derivaciones/{derivacion_id}
pub async fn delete_referral(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path((denuncia_id, derivacion_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if DenunciaReferralRepo::delete(&state.pool, denuncia_id, derivacion_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "DerivacionDenuncia",
            id: derivacion_id,
        }))
    }
}
