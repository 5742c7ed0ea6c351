//! Handlers for the map features: `/rutas` (patrol routes) and `/alertas`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use seguridad_core::error::CoreError;
use seguridad_core::geo::{validate_point, validate_route};
use seguridad_core::identity::require;
use seguridad_core::types::DbId;
use seguridad_db::models::patrol::{Alert, CreateAlert, CreatePatrolRoute, PatrolRoute};
use seguridad_db::repositories::{AlertRepo, PatrolRouteRepo};

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// POST /api/v1/rutas
pub async fn create_route(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Json(input): Json<CreatePatrolRoute>,
) -> AppResult<(StatusCode, Json<PatrolRoute>)> {
    require("name", &input.name)?;
    validate_route(&input.waypoints)?;

    let route = PatrolRouteRepo::create(&state.pool, input.name.trim(), &input.waypoints).await?;
    tracing::info!(route_id = route.id, waypoints = input.waypoints.len(), "Patrol route saved");
    Ok((StatusCode::CREATED, Json(route)))
}

/// GET /api/v1/rutas
pub async fn list_routes(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<Vec<PatrolRoute>>> {
    Ok(Json(PatrolRouteRepo::list(&state.pool).await?))
}

/// DELETE /api/v1/rutas/{id}
pub async fn delete_route(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PatrolRouteRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "RutaPatrullaje",
            id,
        }))
    }
}

/// POST /api/v1/alertas
///
/// Both coordinates are required; `detail` defaults to empty.
pub async fn create_alert(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Json(input): Json<CreateAlert>,
) -> AppResult<(StatusCode, Json<Alert>)> {
    require("title", &input.title)?;
    let latitude = input
        .latitude
        .ok_or_else(|| CoreError::missing_field("latitude"))?;
    let longitude = input
        .longitude
        .ok_or_else(|| CoreError::missing_field("longitude"))?;
    validate_point(latitude, longitude)?;
    let detail = input.detail.as_deref().map(str::trim).unwrap_or("");

    let alert = AlertRepo::create(
        &state.pool,
        input.title.trim(),
        detail,
        latitude,
        longitude,
    )
    .await?;
    tracing::info!(alert_id = alert.id, "Alert raised");
    Ok((StatusCode::CREATED, Json(alert)))
}

/// GET /api/v1/alertas
pub async fn list_alerts(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<Vec<Alert>>> {
    Ok(Json(AlertRepo::list(&state.pool).await?))
}

/// DELETE /api/v1/alertas/{id}
pub async fn delete_alert(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if AlertRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Alerta",
            id,
        }))
    }
}
