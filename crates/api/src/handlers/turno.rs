//! Handlers for the `/turnos` resource (work shifts).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::NaiveTime;
use serde::Deserialize;
use seguridad_core::error::CoreError;
use seguridad_core::identity::require;
use seguridad_core::types::DbId;
use seguridad_db::models::turno::{CreateTurno, Turno, UpdateTurno};
use seguridad_db::repositories::TurnoRepo;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::state::AppState;

/// Body of `POST /turnos`. Every field is required; missing ones are
/// reported by name.
#[derive(Debug, Deserialize)]
pub struct CreateTurnoRequest {
    #[serde(default)]
    pub name: String,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Turno", id })
}

/// GET /api/v1/turnos
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<Vec<Turno>>> {
    Ok(Json(TurnoRepo::list(&state.pool).await?))
}

/// POST /api/v1/turnos
///
/// Night shifts may end before they start (e.g. 22:00 to 06:00).
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateTurnoRequest>,
) -> AppResult<(StatusCode, Json<Turno>)> {
    require("name", &input.name)?;
    let start_time = input.start_time.ok_or_else(|| CoreError::missing_field("start_time"))?;
    let end_time = input.end_time.ok_or_else(|| CoreError::missing_field("end_time"))?;

    let turno = TurnoRepo::create(
        &state.pool,
        &CreateTurno {
            name: input.name,
            start_time,
            end_time,
        },
    )
    .await?;
    tracing::info!(turno_id = turno.id, name = %turno.name, "Turno created");
    Ok((StatusCode::CREATED, Json(turno)))
}

/// GET /api/v1/turnos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Turno>> {
    let turno = TurnoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(turno))
}

/// PUT /api/v1/turnos/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTurno>,
) -> AppResult<Json<Turno>> {
    if let Some(name) = &input.name {
        require("name", name)?;
    }
    let turno = TurnoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(turno))
}

/// DELETE /api/v1/turnos/{id}
///
/// Users on the shift are kept, with no shift.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TurnoRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
