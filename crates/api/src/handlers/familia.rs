//! Handlers for the `/familias` resource, the top of the classification tree.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use seguridad_core::classification::{validate_node_name, Level};
use seguridad_core::error::CoreError;
use seguridad_core::types::DbId;
use seguridad_db::models::classification::{CreateFamilia, Familia, UpdateFamilia};
use seguridad_db::repositories::FamiliaRepo;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Familia",
        id,
    })
}

/// POST /api/v1/familias
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateFamilia>,
) -> AppResult<(StatusCode, Json<Familia>)> {
    let name = validate_node_name(Level::Familia, "name", &input.name)?;
    let familia = FamiliaRepo::create(&state.pool, &name).await?;
    tracing::info!(familia_id = familia.id, code = %familia.code, user_id = admin.user_id, "Familia created");
    Ok((StatusCode::CREATED, Json(familia)))
}

/// GET /api/v1/familias
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<Vec<Familia>>> {
    Ok(Json(FamiliaRepo::list(&state.pool).await?))
}

/// GET /api/v1/familias/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Familia>> {
    let familia = FamiliaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(familia))
}

/// PUT /api/v1/familias/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFamilia>,
) -> AppResult<Json<Familia>> {
    let input = UpdateFamilia {
        name: input
            .name
            .map(|n| validate_node_name(Level::Familia, "name", &n))
            .transpose()?,
    };
    let familia = FamiliaRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(familia))
}

/// DELETE /api/v1/familias/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if FamiliaRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
