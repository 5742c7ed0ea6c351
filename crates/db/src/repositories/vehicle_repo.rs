//! Repository for the `vehicles` table.

use sqlx::PgPool;
use seguridad_core::status::{ResourceStatus, StatusId};
use seguridad_core::types::DbId;

use crate::models::resource::{CreateVehicle, UpdateVehicle, Vehicle};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, plate, make, model, code, vehicle_type_id, status_id, \
                        odometer_total, created_at, updated_at";

/// Provides CRUD operations for vehicles.
pub struct VehicleRepo;

impl VehicleRepo {
    /// Insert a vehicle. The plate must already be normalized and the
    /// vehicle type id resolved.
    pub async fn create(pool: &PgPool, input: &CreateVehicle) -> Result<Vehicle, sqlx::Error> {
        let query = format!(
            "INSERT INTO vehicles (plate, make, model, code, vehicle_type_id, status_id, odometer_total)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, $7), COALESCE($8, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(&input.plate)
            .bind(&input.make)
            .bind(&input.model)
            .bind(&input.code)
            .bind(input.vehicle_type_id)
            .bind(input.status_id)
            .bind(ResourceStatus::Available.id())
            .bind(input.odometer_total)
            .fetch_one(pool)
            .await
    }

    /// Find a vehicle by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Vehicle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vehicles WHERE id = $1");
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List vehicles ordered by plate, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status_id: Option<StatusId>,
    ) -> Result<Vec<Vehicle>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vehicles
             WHERE ($1::SMALLINT IS NULL OR status_id = $1)
             ORDER BY plate"
        );
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(status_id)
            .fetch_all(pool)
            .await
    }

    /// Update a vehicle. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVehicle,
    ) -> Result<Option<Vehicle>, sqlx::Error> {
        let query = format!(
            "UPDATE vehicles SET
                plate = COALESCE($2, plate),
                make = COALESCE($3, make),
                model = COALESCE($4, model),
                code = COALESCE($5, code),
                vehicle_type_id = COALESCE($6, vehicle_type_id),
                status_id = COALESCE($7, status_id),
                odometer_total = COALESCE($8, odometer_total)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(id)
            .bind(&input.plate)
            .bind(&input.make)
            .bind(&input.model)
            .bind(&input.code)
            .bind(input.vehicle_type_id)
            .bind(input.status_id)
            .bind(input.odometer_total)
            .fetch_optional(pool)
            .await
    }

    /// Number of complaint dispatch records that used the vehicle.
    pub async fn count_dispatches(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM denuncia_vehicles WHERE vehicle_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Delete a vehicle and its checkout history. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
