//! External emergency service (police, firefighters, ambulance) model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use seguridad_core::types::{DbId, Timestamp};

/// A row from the `emergency_services` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmergencyService {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an emergency service.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmergencyService {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
}

/// DTO for updating an emergency service.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEmergencyService {
    pub name: Option<String>,
    pub code: Option<String>,
}
