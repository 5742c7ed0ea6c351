//! Repository for the `vehicle_assignments` table.
//!
//! Closing a checkout (setting `odometer_end`) rolls the distance driven
//! into the vehicle's `odometer_total` in the same transaction.

use chrono::NaiveDate;
use sqlx::PgPool;
use seguridad_core::error::CoreError;
use seguridad_core::resources::distance_travelled;
use seguridad_core::types::DbId;

use crate::error::DbError;
use crate::models::assignment::{UpdateVehicleAssignment, VehicleAssignment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, vehicle_id, assigned_on, odometer_start, odometer_end, \
                        distance_km, created_at, updated_at";

/// Provides CRUD operations for vehicle checkouts.
pub struct VehicleAssignmentRepo;

impl VehicleAssignmentRepo {
    /// Check a vehicle out to a user.
    ///
    /// `odometer_start` defaults to the vehicle's current `odometer_total`.
    /// A missing vehicle is a validation error.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        vehicle_id: DbId,
        assigned_on: NaiveDate,
        odometer_start: Option<i32>,
    ) -> Result<VehicleAssignment, DbError> {
        let mut tx = pool.begin().await?;
        let odometer_total: Option<i32> =
            sqlx::query_scalar("SELECT odometer_total FROM vehicles WHERE id = $1 FOR UPDATE")
                .bind(vehicle_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(odometer_total) = odometer_total else {
            return Err(CoreError::unknown_reference("vehicle").into());
        };
        let odometer_start = odometer_start.unwrap_or(odometer_total);
        if odometer_start < 0 {
            return Err(
                CoreError::Validation("odometer_start cannot be negative".to_string()).into(),
            );
        }

        let query = format!(
            "INSERT INTO vehicle_assignments (user_id, vehicle_id, assigned_on, odometer_start)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let assignment = sqlx::query_as::<_, VehicleAssignment>(&query)
            .bind(user_id)
            .bind(vehicle_id)
            .bind(assigned_on)
            .bind(odometer_start)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(assignment)
    }

    /// Find a vehicle assignment by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<VehicleAssignment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vehicle_assignments WHERE id = $1");
        sqlx::query_as::<_, VehicleAssignment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List assignments, newest first, optionally for one user or vehicle.
    pub async fn list(
        pool: &PgPool,
        user_id: Option<DbId>,
        vehicle_id: Option<DbId>,
    ) -> Result<Vec<VehicleAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vehicle_assignments
             WHERE ($1::BIGINT IS NULL OR user_id = $1)
               AND ($2::BIGINT IS NULL OR vehicle_id = $2)
             ORDER BY assigned_on DESC, id DESC"
        );
        sqlx::query_as::<_, VehicleAssignment>(&query)
            .bind(user_id)
            .bind(vehicle_id)
            .fetch_all(pool)
            .await
    }

    /// Update an assignment and keep the vehicle odometer in step.
    ///
    /// The distance is recomputed from the merged start/end readings and the
    /// difference to the previously recorded distance is added to the
    /// vehicle's `odometer_total`. Returns `None` if no row with the given
    /// `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVehicleAssignment,
    ) -> Result<Option<VehicleAssignment>, DbError> {
        let mut tx = pool.begin().await?;
        let query = format!("SELECT {COLUMNS} FROM vehicle_assignments WHERE id = $1 FOR UPDATE");
        let current = sqlx::query_as::<_, VehicleAssignment>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(current) = current else {
            return Ok(None);
        };

        let odometer_start = input.odometer_start.unwrap_or(current.odometer_start);
        let odometer_end = input.odometer_end.or(current.odometer_end);
        let distance_km = match odometer_end {
            Some(end) => distance_travelled(odometer_start, end)?,
            None => 0,
        };
        let delta = distance_km - current.distance_km;

        if delta != 0 {
            sqlx::query(
                "UPDATE vehicles SET odometer_total = GREATEST(odometer_total + $2, 0)
                 WHERE id = $1",
            )
            .bind(current.vehicle_id)
            .bind(delta)
            .execute(&mut *tx)
            .await?;
            tracing::debug!(
                assignment_id = id,
                vehicle_id = current.vehicle_id,
                delta,
                "Adjusted vehicle odometer"
            );
        }

        let query = format!(
            "UPDATE vehicle_assignments SET
                assigned_on = COALESCE($2, assigned_on),
                odometer_start = $3,
                odometer_end = $4,
                distance_km = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let assignment = sqlx::query_as::<_, VehicleAssignment>(&query)
            .bind(id)
            .bind(input.assigned_on)
            .bind(odometer_start)
            .bind(odometer_end)
            .bind(distance_km)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(assignment)
    }

    /// Delete an assignment. The vehicle odometer is left as it is.
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vehicle_assignments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
