//! Work shift (turno) model and DTOs.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use seguridad_core::types::{DbId, Timestamp};

/// A row from the `turnos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Turno {
    pub id: DbId,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new turno.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTurno {
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// DTO for updating a turno. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTurno {
    pub name: Option<String>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}
