//! Handlers for the `/ciudadanos` resource (citizen reporters).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use seguridad_core::error::CoreError;
use seguridad_core::identity::{require, validate_phone, validate_rut};
use seguridad_core::types::DbId;
use seguridad_db::models::ciudadano::{CiudadanoResponse, CreateCiudadano};
use seguridad_db::repositories::CiudadanoRepo;
use validator::Validate;

use crate::auth::password::{hash_or_internal, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// Request body for `POST /ciudadanos/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterCiudadanoRequest {
    #[serde(default)]
    pub rut: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name_paternal: String,
    #[serde(default)]
    pub last_name_maternal: String,
    #[serde(default)]
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/v1/ciudadanos/register
///
/// Public: citizens sign themselves up to file complaints.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterCiudadanoRequest>,
) -> AppResult<(StatusCode, Json<CiudadanoResponse>)> {
    for (field, value) in [
        ("rut", &input.rut),
        ("first_name", &input.first_name),
        ("last_name_paternal", &input.last_name_paternal),
        ("last_name_maternal", &input.last_name_maternal),
        ("email", &input.email),
        ("phone", &input.phone),
        ("password", &input.password),
    ] {
        require(field, value)?;
    }
    validate_rut(&input.rut)?;
    validate_phone(&input.phone)?;
    input.validate()?;
    validate_password_strength(&input.password)?;

    if CiudadanoRepo::email_or_rut_taken(&state.pool, &input.email, &input.rut).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "A citizen with this email or RUT is already registered".into(),
        )));
    }

    let ciudadano = CiudadanoRepo::create(
        &state.pool,
        &CreateCiudadano {
            rut: input.rut,
            first_name: input.first_name.trim().to_string(),
            last_name_paternal: input.last_name_paternal.trim().to_string(),
            last_name_maternal: input.last_name_maternal.trim().to_string(),
            email: input.email.trim().to_string(),
            phone: input.phone,
            password_hash: hash_or_internal(&input.password)?,
        },
    )
    .await?;
    tracing::info!(ciudadano_id = ciudadano.id, "Citizen registered");

    Ok((StatusCode::CREATED, Json(ciudadano.into())))
}

/// GET /api/v1/ciudadanos
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<Vec<CiudadanoResponse>>> {
    let ciudadanos = CiudadanoRepo::list(&state.pool).await?;
    Ok(Json(ciudadanos.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/ciudadanos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<CiudadanoResponse>> {
    let ciudadano = CiudadanoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ciudadano",
            id,
        }))?;
    Ok(Json(ciudadano.into()))
}
