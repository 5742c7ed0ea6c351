//! Handlers for the `/requerimientos` resource, the classification leaves.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use seguridad_core::classification::{validate_node_name, Level, Severity};
use seguridad_core::error::CoreError;
use seguridad_core::types::DbId;
use seguridad_db::models::classification::{
    CreateRequerimiento, Requerimiento, RequerimientoPath, UpdateRequerimiento,
};
use seguridad_db::repositories::RequerimientoRepo;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::query::SubgrupoFilter;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Requerimiento",
        id,
    })
}

/// POST /api/v1/requerimientos
///
/// Severity defaults to `medium`, description to empty.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateRequerimiento>,
) -> AppResult<(StatusCode, Json<Requerimiento>)> {
    let name = validate_node_name(Level::Requerimiento, "name", &input.name)?;
    let subgrupo_id = input
        .subgrupo_id
        .ok_or_else(|| CoreError::missing_field("subgrupo_id"))?;
    let severity = match input.severity.as_deref() {
        Some(s) => Severity::parse(s)?,
        None => Severity::Medium,
    };
    let description = input.description.as_deref().unwrap_or("").trim();

    let requerimiento =
        RequerimientoRepo::create(&state.pool, subgrupo_id, &name, severity, description).await?;
    tracing::info!(
        requerimiento_id = requerimiento.id,
        subgrupo_id,
        code = %requerimiento.code,
        "Requerimiento created"
    );
    Ok((StatusCode::CREATED, Json(requerimiento)))
}

/// GET /api/v1/requerimientos?subgrupo_id=
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(filter): Query<SubgrupoFilter>,
) -> AppResult<Json<Vec<Requerimiento>>> {
    Ok(Json(
        RequerimientoRepo::list(&state.pool, filter.subgrupo_id).await?,
    ))
}

/// GET /api/v1/requerimientos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Requerimiento>> {
    let requerimiento = RequerimientoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(requerimiento))
}

/// GET /api/v1/requerimientos/{id}/path
pub async fn get_path(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<RequerimientoPath>> {
    let path = RequerimientoRepo::find_path(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(path))
}

/// PUT /api/v1/requerimientos/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRequerimiento>,
) -> AppResult<Json<Requerimiento>> {
    let input = UpdateRequerimiento {
        name: input
            .name
            .map(|n| validate_node_name(Level::Requerimiento, "name", &n))
            .transpose()?,
        severity: input
            .severity
            .map(|s| Severity::parse(&s).map(|v| v.as_str().to_string()))
            .transpose()?,
        description: input.description.map(|d| d.trim().to_string()),
        subgrupo_id: input.subgrupo_id,
    };
    let requerimiento = RequerimientoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(requerimiento))
}

/// DELETE /api/v1/requerimientos/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if RequerimientoRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
