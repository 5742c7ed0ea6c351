//! Repository for the `fiscalizaciones` table.

use sqlx::PgPool;
use seguridad_core::types::{DbId, Timestamp};

use crate::models::fiscalizacion::{CreateFiscalizacion, Fiscalizacion, UpdateFiscalizacion};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, inspected_at, kind, detail, driver_first_name, driver_last_name, \
                        driver_rut, vehicle_plate, user_id, created_at, updated_at";

/// Provides CRUD operations for roadside inspections.
pub struct FiscalizacionRepo;

impl FiscalizacionRepo {
    /// Record an inspection performed by `user_id` at `inspected_at`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        inspected_at: Timestamp,
        input: &CreateFiscalizacion,
    ) -> Result<Fiscalizacion, sqlx::Error> {
        let query = format!(
            "INSERT INTO fiscalizaciones (inspected_at, kind, detail, driver_first_name, \
                                          driver_last_name, driver_rut, vehicle_plate, user_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fiscalizacion>(&query)
            .bind(inspected_at)
            .bind(&input.kind)
            .bind(&input.detail)
            .bind(&input.driver_first_name)
            .bind(&input.driver_last_name)
            .bind(&input.driver_rut)
            .bind(&input.vehicle_plate)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find an inspection by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Fiscalizacion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fiscalizaciones WHERE id = $1");
        sqlx::query_as::<_, Fiscalizacion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List inspections, most recent first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Fiscalizacion>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM fiscalizaciones ORDER BY inspected_at DESC, id DESC");
        sqlx::query_as::<_, Fiscalizacion>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update an inspection. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFiscalizacion,
    ) -> Result<Option<Fiscalizacion>, sqlx::Error> {
        let query = format!(
            "UPDATE fiscalizaciones SET
                inspected_at = COALESCE($2, inspected_at),
                kind = COALESCE($3, kind),
                detail = COALESCE($4, detail),
                driver_first_name = COALESCE($5, driver_first_name),
                driver_last_name = COALESCE($6, driver_last_name),
                driver_rut = COALESCE($7, driver_rut),
                vehicle_plate = COALESCE($8, vehicle_plate)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fiscalizacion>(&query)
            .bind(id)
            .bind(input.inspected_at)
            .bind(&input.kind)
            .bind(&input.detail)
            .bind(&input.driver_first_name)
            .bind(&input.driver_last_name)
            .bind(&input.driver_rut)
            .bind(&input.vehicle_plate)
            .fetch_optional(pool)
            .await
    }

    /// Delete an inspection. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM fiscalizaciones WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
