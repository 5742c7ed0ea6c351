//! Read models behind the admin dashboard.

use serde::Serialize;
use sqlx::FromRow;
use seguridad_core::status::StatusId;

/// Headline counts shown on the admin dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DashboardCounts {
    pub users: i64,
    pub active_users: i64,
    pub ciudadanos: i64,
    pub familias: i64,
    pub grupos: i64,
    pub subgrupos: i64,
    pub requerimientos: i64,
    pub denuncias: i64,
    pub open_denuncias: i64,
    pub vehicles_available: i64,
    pub radios_available: i64,
    pub pending_requests: i64,
}

/// Number of complaints in each status.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DenunciaStatusCount {
    pub status_id: StatusId,
    pub name: String,
    pub count: i64,
}

/// Number of complaints filed under each requerimiento, busiest first.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RequerimientoUsage {
    pub requerimiento_id: i64,
    pub code: String,
    pub name: String,
    pub count: i64,
}
