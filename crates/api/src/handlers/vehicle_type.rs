//! Handlers for the `/vehicle-types` resource.

use axum::extract::State;
use axum::http::StatusCode;
use seguridad_core::identity::require;
use seguridad_db::models::resource::{CreateVehicleType, VehicleType};
use seguridad_db::repositories::VehicleTypeRepo;

use crate::error::AppResult;
use crate::extract::Json;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::state::AppState;

/// GET /api/v1/vehicle-types
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<Vec<VehicleType>>> {
    Ok(Json(VehicleTypeRepo::list(&state.pool).await?))
}

/// POST /api/v1/vehicle-types
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateVehicleType>,
) -> AppResult<(StatusCode, Json<VehicleType>)> {
    require("name", &input.name)?;
    let vehicle_type = VehicleTypeRepo::create(&state.pool, input.name.trim()).await?;
    Ok((StatusCode::CREATED, Json(vehicle_type)))
}
