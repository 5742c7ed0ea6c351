//! Handlers for the `/denuncias` resource (citizen complaints).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::Utc;
use seguridad_core::denuncia::procedure_minutes;
use seguridad_core::error::CoreError;
use seguridad_core::identity::require;
use seguridad_core::status::DenunciaStatus;
use seguridad_core::types::DbId;
use seguridad_db::models::denuncia::{
    CreateDenuncia, Denuncia, DenunciaFilter, NewDenuncia, UpdateDenuncia,
};
use seguridad_db::repositories::{CiudadanoRepo, DenunciaRepo, RequerimientoRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

pub(crate) fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Denuncia",
        id,
    })
}

/// POST /api/v1/denuncias
///
/// The registering operator defaults to the caller, `reported_at` to now
/// and the status to received.
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Json(input): Json<CreateDenuncia>,
) -> AppResult<(StatusCode, Json<Denuncia>)> {
    let citizen_id = input
        .citizen_id
        .ok_or_else(|| CoreError::missing_field("citizen_id"))?;
    let requerimiento_id = input
        .requerimiento_id
        .ok_or_else(|| CoreError::missing_field("requerimiento_id"))?;
    require("address", &input.address)?;
    require("detail", &input.detail)?;
    let quadrant = input
        .quadrant
        .ok_or_else(|| CoreError::missing_field("quadrant"))?;
    let status_id = match input.status_id {
        Some(id) => DenunciaStatus::from_id(id)?.id(),
        None => DenunciaStatus::Received.id(),
    };
    let minutes = procedure_minutes(input.arrival_at, input.ended_at)?;

    let user_id = input.user_id.unwrap_or(staff.user_id);
    ensure_references(&state, Some(citizen_id), Some(requerimiento_id)).await?;
    if UserRepo::find_by_id(&state.pool, user_id).await?.is_none() {
        return Err(AppError::Core(CoreError::unknown_reference("user")));
    }

    let new = NewDenuncia {
        reported_at: input.reported_at.unwrap_or_else(Utc::now),
        citizen_id,
        user_id,
        requerimiento_id,
        address: input.address.trim().to_string(),
        address_reference: input.address_reference.unwrap_or_default(),
        quadrant,
        detail: input.detail.trim().to_string(),
        cameras_visible: input.cameras_visible.unwrap_or(false),
        work_performed: input.work_performed.unwrap_or_default(),
        arrival_at: input.arrival_at,
        ended_at: input.ended_at,
        procedure_minutes: minutes,
        status_id,
    };
    let denuncia = DenunciaRepo::create(&state.pool, &new).await?;
    tracing::info!(
        denuncia_id = denuncia.id,
        requerimiento_id,
        user_id,
        "Denuncia registered"
    );
    Ok((StatusCode::CREATED, Json(denuncia)))
}

/// GET /api/v1/denuncias?status_id=&requerimiento_id=&citizen_id=
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(filter): Query<DenunciaFilter>,
) -> AppResult<Json<Vec<Denuncia>>> {
    Ok(Json(DenunciaRepo::list(&state.pool, &filter).await?))
}

/// GET /api/v1/denuncias/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Denuncia>> {
    let denuncia = DenunciaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(denuncia))
}

/// PUT /api/v1/denuncias/{id}
///
/// `procedure_minutes` is recomputed from the merged timestamps.
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDenuncia>,
) -> AppResult<Json<Denuncia>> {
    for (field, value) in [("address", &input.address), ("detail", &input.detail)] {
        if let Some(value) = value {
            require(field, value)?;
        }
    }
    ensure_references(&state, input.citizen_id, input.requerimiento_id).await?;

    let denuncia = DenunciaRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(denuncia))
}

/// DELETE /api/v1/denuncias/{id}
///
/// Dispatch records go with it.
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !DenunciaRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(denuncia_id = id, deleted_by = staff.user_id, "Denuncia deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// 400 when a referenced citizen or requerimiento does not exist.
async fn ensure_references(
    state: &AppState,
    citizen_id: Option<DbId>,
    requerimiento_id: Option<DbId>,
) -> AppResult<()> {
    if let Some(citizen_id) = citizen_id {
        if CiudadanoRepo::find_by_id(&state.pool, citizen_id)
            .await?
            .is_none()
        {
            return Err(AppError::Core(CoreError::unknown_reference("ciudadano")));
        }
    }
    if let Some(requerimiento_id) = requerimiento_id {
        if RequerimientoRepo::find_by_id(&state.pool, requerimiento_id)
            .await?
            .is_none()
        {
            return Err(AppError::Core(CoreError::unknown_reference("requerimiento")));
        }
    }
    Ok(())
}
