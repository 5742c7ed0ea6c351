//! Intake requests from citizens and workers, plus attached document metadata.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use seguridad_core::status::StatusId;
use seguridad_core::types::{DbId, Timestamp};

/// A row from the `citizen_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CitizenRequest {
    pub id: DbId,
    pub citizen_id: DbId,
    pub requester_kind: String,
    pub requester_name: String,
    pub phone: Option<String>,
    pub email: String,
    pub rut: String,
    pub address: String,
    pub detail: String,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for filing a citizen request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCitizenRequest {
    pub citizen_id: Option<DbId>,
    #[serde(default)]
    pub requester_kind: String,
    #[serde(default)]
    pub requester_name: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub rut: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub detail: String,
}

/// DTO for updating a citizen request. A `status_id` change must follow
/// the review workflow.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCitizenRequest {
    pub requester_kind: Option<String>,
    pub requester_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub detail: Option<String>,
    pub status_id: Option<StatusId>,
}

/// A row from the `request_documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RequestDocument {
    pub id: DbId,
    pub request_id: DbId,
    pub file_name: String,
    pub file_type: String,
    pub file_path: String,
    pub file_size: Option<i64>,
    pub uploaded_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for attaching document metadata to a citizen request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequestDocument {
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub file_path: String,
    pub file_size: Option<i64>,
}

/// A row from the `worker_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkerRequest {
    pub id: DbId,
    pub user_id: DbId,
    pub requester_role: String,
    pub requester_name: String,
    pub phone: Option<String>,
    pub email: String,
    pub rut: String,
    pub address: String,
    pub detail: String,
    pub shift_date: NaiveDate,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for filing a worker request. `user_id` defaults to the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkerRequest {
    pub user_id: Option<DbId>,
    #[serde(default)]
    pub requester_role: String,
    #[serde(default)]
    pub requester_name: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub rut: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub detail: String,
    pub shift_date: Option<NaiveDate>,
}

/// DTO for updating a worker request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWorkerRequest {
    pub requester_role: Option<String>,
    pub requester_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub detail: Option<String>,
    pub shift_date: Option<NaiveDate>,
    pub status_id: Option<StatusId>,
}
