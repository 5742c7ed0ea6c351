//! Dispatch records nested under a complaint: vehicles sent to the scene
//! and referrals to other services.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use seguridad_core::types::{DbId, Timestamp};

/// A row from the `denuncia_vehicles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DenunciaVehicle {
    pub id: DbId,
    pub denuncia_id: DbId,
    pub assignment_order: i32,
    pub assigned_at: Timestamp,
    pub notes: Option<String>,
    pub vehicle_id: DbId,
    pub driver_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for dispatching a vehicle. `assignment_order` defaults to the next
/// free position and `assigned_at` to now.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDenunciaVehicle {
    pub assignment_order: Option<i32>,
    pub assigned_at: Option<Timestamp>,
    pub notes: Option<String>,
    pub vehicle_id: Option<DbId>,
    pub driver_id: Option<DbId>,
}

/// A row from the `denuncia_referrals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DenunciaReferral {
    pub id: DbId,
    pub denuncia_id: DbId,
    pub assignment_order: i32,
    pub kind: String,
    pub referred_at: Timestamp,
    pub notes: Option<String>,
    pub emergency_service_id: Option<DbId>,
    pub driver_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for referring a complaint to another service.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDenunciaReferral {
    pub assignment_order: Option<i32>,
    #[serde(default)]
    pub kind: String,
    pub referred_at: Option<Timestamp>,
    pub notes: Option<String>,
    pub emergency_service_id: Option<DbId>,
    pub driver_id: Option<DbId>,
}
