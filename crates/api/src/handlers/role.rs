//! Handlers for the `/roles` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use seguridad_core::error::CoreError;
use seguridad_core::identity::require;
use seguridad_core::types::DbId;
use seguridad_db::models::role::{CreateRole, Role};
use seguridad_db::repositories::RoleRepo;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::state::AppState;

/// GET /api/v1/roles
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<Vec<Role>>> {
    Ok(Json(RoleRepo::list(&state.pool).await?))
}

/// POST /api/v1/roles
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateRole>,
) -> AppResult<(StatusCode, Json<Role>)> {
    require("name", &input.name)?;
    if RoleRepo::find_by_name(&state.pool, input.name.trim())
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A role named '{}' already exists",
            input.name.trim()
        ))));
    }
    let role = RoleRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

/// DELETE /api/v1/roles/{id}
///
/// 409 while any user still holds the role.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let holders = RoleRepo::count_users(&state.pool, id).await?;
    if holders > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot delete the role because {holders} users hold it"
        ))));
    }
    if RoleRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Role", id }))
    }
}
