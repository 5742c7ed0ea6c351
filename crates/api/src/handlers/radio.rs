//! Handlers for the `/radios` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use seguridad_core::error::CoreError;
use seguridad_core::identity::require;
use seguridad_core::status::ResourceStatus;
use seguridad_core::types::DbId;
use seguridad_db::models::resource::{CreateRadio, Radio, UpdateRadio};
use seguridad_db::repositories::RadioRepo;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Radio", id })
}

/// POST /api/v1/radios
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateRadio>,
) -> AppResult<(StatusCode, Json<Radio>)> {
    require("name", &input.name)?;
    require("code", &input.code)?;
    input.status_id.map(ResourceStatus::from_id).transpose()?;

    let radio = RadioRepo::create(
        &state.pool,
        &CreateRadio {
            name: input.name.trim().to_string(),
            code: input.code.trim().to_string(),
            ..input
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(radio)))
}

/// GET /api/v1/radios
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<Vec<Radio>>> {
    Ok(Json(RadioRepo::list(&state.pool).await?))
}

/// GET /api/v1/radios/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Radio>> {
    let radio = RadioRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(radio))
}

/// PUT /api/v1/radios/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRadio>,
) -> AppResult<Json<Radio>> {
    for (field, value) in [("name", &input.name), ("code", &input.code)] {
        if let Some(value) = value {
            require(field, value)?;
        }
    }
    input.status_id.map(ResourceStatus::from_id).transpose()?;

    let radio = RadioRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(radio))
}

/// DELETE /api/v1/radios/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if RadioRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
