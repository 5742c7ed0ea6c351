//! Shared query parameter types for API handlers.

use serde::Deserialize;
use seguridad_core::status::StatusId;
use seguridad_core::types::DbId;

/// `?familia_id=` filter for grupo listings.
#[derive(Debug, Deserialize)]
pub struct FamiliaFilter {
    pub familia_id: Option<DbId>,
}

/// `?grupo_id=` filter for subgrupo listings.
#[derive(Debug, Deserialize)]
pub struct GrupoFilter {
    pub grupo_id: Option<DbId>,
}

/// `?subgrupo_id=` filter for requerimiento listings.
#[derive(Debug, Deserialize)]
pub struct SubgrupoFilter {
    pub subgrupo_id: Option<DbId>,
}

/// `?status_id=` filter shared by resources and intake requests.
#[derive(Debug, Deserialize)]
pub struct StatusFilter {
    pub status_id: Option<StatusId>,
}

/// `?q=` free-text search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// `?user_id=&vehicle_id=` filters for vehicle assignment listings.
#[derive(Debug, Deserialize)]
pub struct VehicleAssignmentFilter {
    pub user_id: Option<DbId>,
    pub vehicle_id: Option<DbId>,
}

/// `?user_id=&radio_id=` filters for radio assignment listings.
#[derive(Debug, Deserialize)]
pub struct RadioAssignmentFilter {
    pub user_id: Option<DbId>,
    pub radio_id: Option<DbId>,
}
