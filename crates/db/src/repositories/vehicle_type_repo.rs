//! Repository for the `vehicle_types` table.

use sqlx::PgPool;
use seguridad_core::types::DbId;

use crate::models::resource::VehicleType;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides operations for vehicle types.
pub struct VehicleTypeRepo;

impl VehicleTypeRepo {
    /// Insert a vehicle type, returning the created row.
    pub async fn create(pool: &PgPool, name: &str) -> Result<VehicleType, sqlx::Error> {
        let query = format!("INSERT INTO vehicle_types (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, VehicleType>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Find a vehicle type by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<VehicleType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vehicle_types WHERE id = $1");
        sqlx::query_as::<_, VehicleType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all vehicle types ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<VehicleType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vehicle_types ORDER BY name");
        sqlx::query_as::<_, VehicleType>(&query).fetch_all(pool).await
    }
}
