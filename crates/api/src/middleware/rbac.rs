//! Role guards layered on top of [`AuthUser`].
//!
//! Staff roles may work the operational endpoints; only administrators may
//! manage users, the classification tree and the admin pages.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use seguridad_core::error::CoreError;
use seguridad_core::roles::{is_admin, is_staff};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticate, then check the token's role with `allowed`.
async fn guarded(
    parts: &mut Parts,
    state: &AppState,
    allowed: fn(&str) -> bool,
    requirement: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if allowed(&user.role) {
        Ok(user)
    } else {
        tracing::info!(user_id = user.user_id, role = %user.role, requirement, "Role check failed");
        Err(CoreError::Forbidden(format!("{requirement} role required")).into())
    }
}

/// Administrators only. 403 for any other role.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        guarded(parts, state, is_admin, "Administrator").await.map(Self)
    }
}

/// Any back-office role. Tokens are only issued to staff, so this catches
/// tokens that outlive a role change to a non-staff role.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        guarded(parts, state, is_staff, "Staff").await.map(Self)
    }
}
