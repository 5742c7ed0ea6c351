//! Role entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use seguridad_core::types::{DbId, Timestamp};

/// A role row from the `roles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new role.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRole {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}
