//! Roadside inspection (fiscalizacion) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use seguridad_core::types::{DbId, Timestamp};

/// A row from the `fiscalizaciones` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Fiscalizacion {
    pub id: DbId,
    pub inspected_at: Timestamp,
    pub kind: String,
    pub detail: String,
    pub driver_first_name: String,
    pub driver_last_name: String,
    pub driver_rut: String,
    pub vehicle_plate: String,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording an inspection. `user_id` defaults to the inspector
/// making the request and `inspected_at` to now.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFiscalizacion {
    pub inspected_at: Option<Timestamp>,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub driver_first_name: String,
    #[serde(default)]
    pub driver_last_name: String,
    #[serde(default)]
    pub driver_rut: String,
    #[serde(default)]
    pub vehicle_plate: String,
    pub user_id: Option<DbId>,
}

/// DTO for updating an inspection. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFiscalizacion {
    pub inspected_at: Option<Timestamp>,
    pub kind: Option<String>,
    pub detail: Option<String>,
    pub driver_first_name: Option<String>,
    pub driver_last_name: Option<String>,
    pub driver_rut: Option<String>,
    pub vehicle_plate: Option<String>,
}
