//! Vehicle, vehicle type and radio models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use seguridad_core::status::StatusId;
use seguridad_core::types::{DbId, Timestamp};

/// A row from the `vehicle_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VehicleType {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a vehicle type.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVehicleType {
    #[serde(default)]
    pub name: String,
}

/// A row from the `vehicles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vehicle {
    pub id: DbId,
    pub plate: String,
    pub make: String,
    pub model: String,
    pub code: String,
    pub vehicle_type_id: DbId,
    pub status_id: StatusId,
    pub odometer_total: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a vehicle.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVehicle {
    #[serde(default)]
    pub plate: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub code: String,
    pub vehicle_type_id: Option<DbId>,
    pub status_id: Option<StatusId>,
    pub odometer_total: Option<i32>,
}

/// DTO for updating a vehicle. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVehicle {
    pub plate: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub code: Option<String>,
    pub vehicle_type_id: Option<DbId>,
    pub status_id: Option<StatusId>,
    pub odometer_total: Option<i32>,
}

/// A row from the `radios` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Radio {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub description: String,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a radio.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRadio {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    pub description: Option<String>,
    pub status_id: Option<StatusId>,
}

/// DTO for updating a radio. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRadio {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub status_id: Option<StatusId>,
}
