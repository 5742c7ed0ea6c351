//! Handlers for the `/usuarios` resource (staff user management).
//!
//! CRUD is restricted to administrators via [`RequireAdmin`]; the search
//! endpoint used by dispatch forms is open to any staff role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use seguridad_core::error::CoreError;
use seguridad_core::identity::{require, validate_phone, validate_rut};
use seguridad_core::roles::is_staff;
use seguridad_core::search::like_pattern;
use seguridad_core::types::DbId;
use seguridad_db::models::double_option;
use seguridad_db::models::user::{CreateUser, UpdateUser, UserResponse};
use seguridad_db::repositories::{RoleRepo, TurnoRepo, UserRepo};
use validator::Validate;

use crate::auth::password::{hash_or_internal, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::query::SearchParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /usuarios`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
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
    pub role_id: Option<DbId>,
    pub turno_id: Option<DbId>,
}

/// Request body for `PUT /usuarios/{id}`.
///
/// `turno_id: null` clears the shift; omitting it leaves the shift alone.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    pub rut: Option<String>,
    pub first_name: Option<String>,
    pub last_name_paternal: Option<String>,
    pub last_name_maternal: Option<String>,
    #[validate(email(message = "invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub role_id: Option<DbId>,
    #[serde(default, deserialize_with = "double_option")]
    pub turno_id: Option<Option<DbId>>,
    pub is_active: Option<bool>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/usuarios
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
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
    let role_id = input
        .role_id
        .ok_or_else(|| CoreError::missing_field("role_id"))?;
    validate_rut(&input.rut)?;
    validate_phone(&input.phone)?;
    input.validate()?;
    validate_password_strength(&input.password)?;

    ensure_role_exists(&state, role_id).await?;
    if let Some(turno_id) = input.turno_id {
        ensure_turno_exists(&state, turno_id).await?;
    }
    ensure_identity_free(&state, Some(&input.email), Some(&input.rut), None).await?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            rut: input.rut,
            first_name: input.first_name.trim().to_string(),
            last_name_paternal: input.last_name_paternal.trim().to_string(),
            last_name_maternal: input.last_name_maternal.trim().to_string(),
            email: input.email.trim().to_string(),
            phone: input.phone,
            password_hash: hash_or_internal(&input.password)?,
            role_id,
            turno_id: input.turno_id,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, created_by = admin.user_id, "User created");

    let response = load_response(&state, user.id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/usuarios
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    Ok(Json(UserRepo::list(&state.pool).await?))
}

/// GET /api/v1/usuarios/search?q=
///
/// At most ten matches; a blank query returns an empty list.
pub async fn search(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let Some(pattern) = like_pattern(&params.q) else {
        return Ok(Json(Vec::new()));
    };
    Ok(Json(UserRepo::search(&state.pool, &pattern).await?))
}

/// GET /api/v1/usuarios/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    Ok(Json(load_response(&state, id).await?))
}

/// PUT /api/v1/usuarios/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    for (field, value) in [
        ("rut", &input.rut),
        ("first_name", &input.first_name),
        ("last_name_paternal", &input.last_name_paternal),
        ("last_name_maternal", &input.last_name_maternal),
        ("email", &input.email),
        ("phone", &input.phone),
    ] {
        if let Some(value) = value {
            require(field, value)?;
        }
    }
    if let Some(rut) = &input.rut {
        validate_rut(rut)?;
    }
    if let Some(phone) = &input.phone {
        validate_phone(phone)?;
    }
    input.validate()?;
    if let Some(password) = &input.password {
        validate_password_strength(password)?;
    }

    if UserRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(not_found(id));
    }
    if let Some(role_id) = input.role_id {
        ensure_role_exists(&state, role_id).await?;
    }
    if let Some(Some(turno_id)) = input.turno_id {
        ensure_turno_exists(&state, turno_id).await?;
    }
    ensure_identity_free(&state, input.email.as_deref(), input.rut.as_deref(), Some(id)).await?;

    let password_hash = input.password.as_deref().map(hash_or_internal).transpose()?;

    let trimmed = |v: Option<String>| v.map(|s| s.trim().to_string());
    let update = UpdateUser {
        rut: input.rut,
        first_name: trimmed(input.first_name),
        last_name_paternal: trimmed(input.last_name_paternal),
        last_name_maternal: trimmed(input.last_name_maternal),
        email: trimmed(input.email),
        phone: input.phone,
        role_id: input.role_id,
        turno_id: input.turno_id,
        is_active: input.is_active,
        password_hash,
    };
    UserRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| not_found(id))?;
    if update.password_hash.is_some() {
        tracing::info!(user_id = id, "Password changed by administrator");
    }

    Ok(Json(load_response(&state, id).await?))
}

/// DELETE /api/v1/usuarios/{id}
///
/// Only staff accounts can be deleted, and only while no complaint,
/// dispatch or inspection record references them.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let user = load_response(&state, id).await?;

    if !is_staff(&user.role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Users with role '{}' cannot be deleted",
            user.role
        ))));
    }

    let dependents = UserRepo::count_dependents(&state.pool, id).await?;
    if dependents > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot delete the user because {dependents} denuncia, dispatch or \
             fiscalizacion records reference it"
        ))));
    }

    if !UserRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(user_id = id, deleted_by = admin.user_id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Usuario",
        id,
    })
}

async fn load_response(state: &AppState, id: DbId) -> AppResult<UserResponse> {
    UserRepo::find_response_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

async fn ensure_role_exists(state: &AppState, role_id: DbId) -> AppResult<()> {
    if RoleRepo::find_by_id(&state.pool, role_id).await?.is_none() {
        return Err(AppError::Core(CoreError::unknown_reference("role")));
    }
    Ok(())
}

async fn ensure_turno_exists(state: &AppState, turno_id: DbId) -> AppResult<()> {
    if TurnoRepo::find_by_id(&state.pool, turno_id).await?.is_none() {
        return Err(AppError::Core(CoreError::unknown_reference("turno")));
    }
    Ok(())
}

/// 409 when another user already holds the email or RUT.
async fn ensure_identity_free(
    state: &AppState,
    email: Option<&str>,
    rut: Option<&str>,
    exclude_id: Option<DbId>,
) -> AppResult<()> {
    if let Some(email) = email {
        if UserRepo::email_taken(&state.pool, email, exclude_id).await? {
            return Err(AppError::Core(CoreError::Conflict(
                "A user with this email already exists".into(),
            )));
        }
    }
    if let Some(rut) = rut {
        if UserRepo::rut_taken(&state.pool, rut, exclude_id).await? {
            return Err(AppError::Core(CoreError::Conflict(
                "A user with this RUT already exists".into(),
            )));
        }
    }
    Ok(())
}
