//! Handlers for the `/servicios-emergencia` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use seguridad_core::error::CoreError;
use seguridad_core::identity::require;
use seguridad_core::types::DbId;
use seguridad_db::models::emergency_service::{
    CreateEmergencyService, EmergencyService, UpdateEmergencyService,
};
use seguridad_db::repositories::EmergencyServiceRepo;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ServicioEmergencia",
        id,
    })
}

/// POST /api/v1/servicios-emergencia
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateEmergencyService>,
) -> AppResult<(StatusCode, Json<EmergencyService>)> {
    require("name", &input.name)?;
    require("code", &input.code)?;
    let service = EmergencyServiceRepo::create(
        &state.pool,
        &CreateEmergencyService {
            name: input.name.trim().to_string(),
            code: input.code.trim().to_uppercase(),
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(service)))
}

/// GET /api/v1/servicios-emergencia
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<Vec<EmergencyService>>> {
    Ok(Json(EmergencyServiceRepo::list(&state.pool).await?))
}

/// GET /api/v1/servicios-emergencia/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<EmergencyService>> {
    let service = EmergencyServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(service))
}

/// PUT /api/v1/servicios-emergencia/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEmergencyService>,
) -> AppResult<Json<EmergencyService>> {
    for (field, value) in [("name", &input.name), ("code", &input.code)] {
        if let Some(value) = value {
            require(field, value)?;
        }
    }
    let input = UpdateEmergencyService {
        name: input.name.map(|n| n.trim().to_string()),
        code: input.code.map(|c| c.trim().to_uppercase()),
    };
    let service = EmergencyServiceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(service))
}

/// DELETE /api/v1/servicios-emergencia/{id}
///
/// 409 while referrals point at the service.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let referrals = EmergencyServiceRepo::count_referrals(&state.pool, id).await?;
    if referrals > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot delete the emergency service because {referrals} referrals point to it"
        ))));
    }
    if EmergencyServiceRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
