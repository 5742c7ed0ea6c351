//! Handlers for the `/subgrupos` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use seguridad_core::classification::{validate_node_name, Level};
use seguridad_core::error::CoreError;
use seguridad_core::types::DbId;
use seguridad_db::models::classification::{CreateSubgrupo, Subgrupo, UpdateSubgrupo};
use seguridad_db::repositories::SubgrupoRepo;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::query::GrupoFilter;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Subgrupo", id })
}

/// POST /api/v1/subgrupos
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateSubgrupo>,
) -> AppResult<(StatusCode, Json<Subgrupo>)> {
    let name = validate_node_name(Level::Subgrupo, "name", &input.name)?;
    let grupo_id = input
        .grupo_id
        .ok_or_else(|| CoreError::missing_field("grupo_id"))?;
    let subgrupo = SubgrupoRepo::create(&state.pool, grupo_id, &name).await?;
    tracing::info!(subgrupo_id = subgrupo.id, grupo_id, code = %subgrupo.code, "Subgrupo created");
    Ok((StatusCode::CREATED, Json(subgrupo)))
}

/// GET /api/v1/subgrupos?grupo_id=
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(filter): Query<GrupoFilter>,
) -> AppResult<Json<Vec<Subgrupo>>> {
    Ok(Json(SubgrupoRepo::list(&state.pool, filter.grupo_id).await?))
}

/// GET /api/v1/subgrupos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Subgrupo>> {
    let subgrupo = SubgrupoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(subgrupo))
}

/// PUT /api/v1/subgrupos/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubgrupo>,
) -> AppResult<Json<Subgrupo>> {
    let input = UpdateSubgrupo {
        name: input
            .name
            .map(|n| validate_node_name(Level::Subgrupo, "name", &n))
            .transpose()?,
    };
    let subgrupo = SubgrupoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(subgrupo))
}

/// DELETE /api/v1/subgrupos/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if SubgrupoRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
