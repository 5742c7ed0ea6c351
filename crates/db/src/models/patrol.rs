//! Patrol routes and map alerts.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use seguridad_core::geo::Waypoint;
use seguridad_core::types::{DbId, Timestamp};

/// A row from the `patrol_routes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PatrolRoute {
    pub id: DbId,
    pub name: String,
    pub waypoints: Json<Vec<Waypoint>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for saving a patrol route.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePatrolRoute {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
}

/// A row from the `alerts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Alert {
    pub id: DbId,
    pub title: String,
    pub detail: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for raising a map alert.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAlert {
    #[serde(default)]
    pub title: String,
    pub detail: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
