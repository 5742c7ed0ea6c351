//! Staff user entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use seguridad_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub rut: String,
    pub first_name: String,
    pub last_name_paternal: String,
    pub last_name_maternal: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub turno_id: Option<DbId>,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash), with
/// the role and turno names resolved.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub rut: String,
    pub first_name: String,
    pub last_name_paternal: String,
    pub last_name_maternal: String,
    pub email: String,
    pub phone: String,
    pub role_id: DbId,
    /// Resolved role name (e.g. `"administrador"`, `"operador"`).
    pub role: String,
    pub turno_id: Option<DbId>,
    pub turno: Option<String>,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub rut: String,
    pub first_name: String,
    pub last_name_paternal: String,
    pub last_name_maternal: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub turno_id: Option<DbId>,
}

/// DTO for updating an existing user. All fields are optional.
///
/// `turno_id` is doubly optional: `Some(None)` clears the shift. Profile
/// and password change in the same statement.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub rut: Option<String>,
    pub first_name: Option<String>,
    pub last_name_paternal: Option<String>,
    pub last_name_maternal: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role_id: Option<DbId>,
    pub turno_id: Option<Option<DbId>>,
    pub is_active: Option<bool>,
    /// Already-hashed replacement password.
    pub password_hash: Option<String>,
}
