//! Repository for the `denuncia_vehicles` table (vehicles dispatched to a
//! complaint).

use sqlx::PgPool;
use seguridad_core::types::{DbId, Timestamp};

use crate::error::DbError;
use crate::models::dispatch::DenunciaVehicle;
use crate::repositories::dispatch_order;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, denuncia_id, assignment_order, assigned_at, notes, vehicle_id, \
                        driver_id, created_at, updated_at";

/// Provides operations for vehicle dispatch records.
pub struct DenunciaVehicleRepo;

impl DenunciaVehicleRepo {
    /// Dispatch a vehicle to a complaint.
    ///
    /// When `assignment_order` is `None` the next position after the
    /// current maximum is used; a taken position violates
    /// `uq_denuncia_vehicles_denuncia_order`.
    pub async fn create(
        pool: &PgPool,
        denuncia_id: DbId,
        assignment_order: Option<i32>,
        assigned_at: Timestamp,
        notes: Option<&str>,
        vehicle_id: DbId,
        driver_id: DbId,
    ) -> Result<DenunciaVehicle, DbError> {
        let mut tx = pool.begin().await?;
        let order =
            dispatch_order::resolve(&mut tx, "denuncia_vehicles", denuncia_id, assignment_order)
                .await?;

        let query = format!(
            "INSERT INTO denuncia_vehicles \
                (denuncia_id, assignment_order, assigned_at, notes, vehicle_id, driver_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let dispatch = sqlx::query_as::<_, DenunciaVehicle>(&query)
            .bind(denuncia_id)
            .bind(order)
            .bind(assigned_at)
            .bind(notes)
            .bind(vehicle_id)
            .bind(driver_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(dispatch)
    }

    /// List a complaint's vehicle dispatches in assignment order.
    pub async fn list_for_denuncia(
        pool: &PgPool,
        denuncia_id: DbId,
    ) -> Result<Vec<DenunciaVehicle>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM denuncia_vehicles
             WHERE denuncia_id = $1
             ORDER BY assignment_order"
        );
        sqlx::query_as::<_, DenunciaVehicle>(&query)
            .bind(denuncia_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a dispatch record belonging to `denuncia_id`.
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, denuncia_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM denuncia_vehicles WHERE id = $1 AND denuncia_id = $2")
                .bind(id)
                .bind(denuncia_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
