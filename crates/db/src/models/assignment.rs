//! Resource checkout models: vehicle and radio assignments.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use seguridad_core::types::{DbId, Timestamp};

/// A row from the `vehicle_assignments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VehicleAssignment {
    pub id: DbId,
    pub user_id: DbId,
    pub vehicle_id: DbId,
    pub assigned_on: NaiveDate,
    pub odometer_start: i32,
    pub odometer_end: Option<i32>,
    pub distance_km: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for checking out a vehicle.
///
/// `odometer_start` defaults to the vehicle's current `odometer_total`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVehicleAssignment {
    pub user_id: Option<DbId>,
    pub vehicle_id: Option<DbId>,
    pub assigned_on: Option<NaiveDate>,
    pub odometer_start: Option<i32>,
}

/// DTO for updating a vehicle assignment. Setting `odometer_end` closes
/// the trip and rolls the distance into the vehicle's odometer.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateVehicleAssignment {
    pub assigned_on: Option<NaiveDate>,
    pub odometer_start: Option<i32>,
    pub odometer_end: Option<i32>,
}

/// A row from the `radio_assignments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RadioAssignment {
    pub id: DbId,
    pub user_id: DbId,
    pub radio_id: DbId,
    pub assigned_on: NaiveDate,
    pub returned_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for checking out a radio.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRadioAssignment {
    pub user_id: Option<DbId>,
    pub radio_id: Option<DbId>,
    pub assigned_on: Option<NaiveDate>,
}
