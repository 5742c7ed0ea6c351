//! Complaint (denuncia) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use seguridad_core::status::StatusId;
use seguridad_core::types::{DbId, Timestamp};

use super::double_option;

/// A row from the `denuncias` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Denuncia {
    pub id: DbId,
    pub reported_at: Timestamp,
    pub citizen_id: DbId,
    pub user_id: DbId,
    pub requerimiento_id: DbId,
    pub address: String,
    pub address_reference: String,
    pub quadrant: i32,
    pub detail: String,
    pub cameras_visible: bool,
    pub work_performed: String,
    pub arrival_at: Option<Timestamp>,
    pub ended_at: Option<Timestamp>,
    /// Whole minutes between `arrival_at` and `ended_at`.
    pub procedure_minutes: Option<i32>,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a complaint.
///
/// `user_id` defaults to the authenticated operator and `reported_at` to now.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDenuncia {
    pub reported_at: Option<Timestamp>,
    pub citizen_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub requerimiento_id: Option<DbId>,
    #[serde(default)]
    pub address: String,
    pub address_reference: Option<String>,
    pub quadrant: Option<i32>,
    #[serde(default)]
    pub detail: String,
    pub cameras_visible: Option<bool>,
    pub work_performed: Option<String>,
    pub arrival_at: Option<Timestamp>,
    pub ended_at: Option<Timestamp>,
    pub status_id: Option<StatusId>,
}

/// Validated insert for the `denuncias` table.
#[derive(Debug, Clone)]
pub struct NewDenuncia {
    pub reported_at: Timestamp,
    pub citizen_id: DbId,
    pub user_id: DbId,
    pub requerimiento_id: DbId,
    pub address: String,
    pub address_reference: String,
    pub quadrant: i32,
    pub detail: String,
    pub cameras_visible: bool,
    pub work_performed: String,
    pub arrival_at: Option<Timestamp>,
    pub ended_at: Option<Timestamp>,
    pub procedure_minutes: Option<i32>,
    pub status_id: StatusId,
}

/// DTO for updating a complaint. All fields are optional; the timestamps
/// accept an explicit `null` to clear them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDenuncia {
    pub reported_at: Option<Timestamp>,
    pub citizen_id: Option<DbId>,
    pub requerimiento_id: Option<DbId>,
    pub address: Option<String>,
    pub address_reference: Option<String>,
    pub quadrant: Option<i32>,
    pub detail: Option<String>,
    pub cameras_visible: Option<bool>,
    pub work_performed: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub arrival_at: Option<Option<Timestamp>>,
    #[serde(default, deserialize_with = "double_option")]
    pub ended_at: Option<Option<Timestamp>>,
    pub status_id: Option<StatusId>,
}

/// Optional filters for listing complaints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DenunciaFilter {
    pub status_id: Option<StatusId>,
    pub requerimiento_id: Option<DbId>,
    pub citizen_id: Option<DbId>,
}
