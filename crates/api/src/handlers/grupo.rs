//! Handlers for the `/grupos` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use seguridad_core::classification::{validate_node_name, Level};
use seguridad_core::error::CoreError;
use seguridad_core::types::DbId;
use seguridad_db::models::classification::{CreateGrupo, Grupo, UpdateGrupo};
use seguridad_db::repositories::GrupoRepo;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::query::FamiliaFilter;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Grupo", id })
}

/// POST /api/v1/grupos
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateGrupo>,
) -> AppResult<(StatusCode, Json<Grupo>)> {
    let name = validate_node_name(Level::Grupo, "name", &input.name)?;
    let familia_id = input
        .familia_id
        .ok_or_else(|| CoreError::missing_field("familia_id"))?;
    let grupo = GrupoRepo::create(&state.pool, familia_id, &name).await?;
    tracing::info!(grupo_id = grupo.id, familia_id, code = %grupo.code, "Grupo created");
    Ok((StatusCode::CREATED, Json(grupo)))
}

/// GET /api/v1/grupos?familia_id=
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(filter): Query<FamiliaFilter>,
) -> AppResult<Json<Vec<Grupo>>> {
    Ok(Json(GrupoRepo::list(&state.pool, filter.familia_id).await?))
}

/// GET /api/v1/grupos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Grupo>> {
    let grupo = GrupoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(grupo))
}

/// PUT /api/v1/grupos/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGrupo>,
) -> AppResult<Json<Grupo>> {
    let input = UpdateGrupo {
        name: input
            .name
            .map(|n| validate_node_name(Level::Grupo, "name", &n))
            .transpose()?,
    };
    let grupo = GrupoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(grupo))
}

/// DELETE /api/v1/grupos/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if GrupoRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
