//! Handlers for the `/auth` resource (login, refresh, logout, me).

use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use seguridad_core::error::CoreError;
use seguridad_core::identity::{display_name, require};
use seguridad_core::roles::is_staff;
use seguridad_core::types::{DbId, Timestamp};
use seguridad_db::models::session::CreateSession;
use seguridad_db::models::user::User;
use seguridad_db::repositories::{RoleRepo, SessionRepo, UserRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: String,
}

/// Returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: SessionUser,
}

#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Returned by `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: DbId,
    pub name: String,
    pub role: String,
    /// Expiry of the newest active session, if one is still open.
    pub session_expires_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Only active users whose role is in the staff allow-list may sign in.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    require("email", &input.email)?;
    require("password", &input.password)?;

    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Rejected login with wrong password");
        return Err(invalid());
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let role = role_name(&state, &user).await?;
    if !is_staff(&role) {
        tracing::info!(user_id = user.id, %role, "Rejected login for non-staff role");
        return Err(AppError::Core(CoreError::Forbidden(
            "This role cannot sign in to the back office".into(),
        )));
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;
    let pruned = SessionRepo::prune_for_user(&state.pool, user.id).await?;
    if pruned > 0 {
        tracing::debug!(user_id = user.id, pruned, "Dropped stale sessions");
    }
    let response = create_auth_response(&state, &user, &role).await?;
    tracing::info!(user_id = user.id, %role, "User signed in");

    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Rotates the refresh token: the presented session is revoked and a new
/// one is opened.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    require("refresh_token", &input.refresh_token)?;

    let token_hash = hash_refresh_token(&input.refresh_token);
    let session = SessionRepo::claim(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    // The role may have changed since the session was opened.
    let role = role_name(&state, &user).await?;
    if !is_staff(&role) {
        return Err(AppError::Core(CoreError::Forbidden(
            "This role cannot sign in to the back office".into(),
        )));
    }

    let response = create_auth_response(&state, &user, &role).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revokes every session of the caller.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::close_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, revoked, "User signed out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn me(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<Json<MeResponse>> {
    let session = SessionRepo::latest_for_user(&state.pool, auth_user.user_id).await?;

    let response = match session {
        Some(session) => MeResponse {
            id: auth_user.user_id,
            name: session.display_name,
            role: session.role_name,
            session_expires_at: Some(session.expires_at),
        },
        None => MeResponse {
            id: auth_user.user_id,
            name: auth_user.name,
            role: auth_user.role,
            session_expires_at: None,
        },
    };
    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn role_name(state: &AppState, user: &User) -> AppResult<String> {
    let role = RoleRepo::find_by_id(&state.pool, user.role_id)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("User {} has no role row", user.id)))?;
    Ok(role.name)
}

/// Issue tokens, persist the session row and build the response.
async fn create_auth_response(
    state: &AppState,
    user: &User,
    role: &str,
) -> AppResult<AuthResponse> {
    let name = display_name(&user.first_name, &user.last_name_paternal);

    let access_token = generate_access_token(user.id, role, &name, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let expires_at = Utc::now() + state.config.jwt.refresh_ttl();

    SessionRepo::open(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh_hash,
            display_name: name.clone(),
            role_name: role.to_string(),
            expires_at,
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_ttl().num_seconds(),
        user: SessionUser {
            id: user.id,
            name,
            email: user.email.clone(),
            role: role.to_string(),
        },
    })
}
