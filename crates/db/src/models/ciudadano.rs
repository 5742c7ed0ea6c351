//! Citizen (ciudadano) account model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use seguridad_core::types::{DbId, Timestamp};

/// Full row from the `ciudadanos` table, including the password hash.
#[derive(Debug, Clone, FromRow)]
pub struct Ciudadano {
    pub id: DbId,
    pub rut: String,
    pub first_name: String,
    pub last_name_paternal: String,
    pub last_name_maternal: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Citizen as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct CiudadanoResponse {
    pub id: DbId,
    pub rut: String,
    pub first_name: String,
    pub last_name_paternal: String,
    pub last_name_maternal: String,
    pub email: String,
    pub phone: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<Ciudadano> for CiudadanoResponse {
    fn from(c: Ciudadano) -> Self {
        Self {
            id: c.id,
            rut: c.rut,
            first_name: c.first_name,
            last_name_paternal: c.last_name_paternal,
            last_name_maternal: c.last_name_maternal,
            email: c.email,
            phone: c.phone,
            is_active: c.is_active,
            created_at: c.created_at,
        }
    }
}

/// DTO for registering a citizen. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateCiudadano {
    pub rut: String,
    pub first_name: String,
    pub last_name_paternal: String,
    pub last_name_maternal: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
}
