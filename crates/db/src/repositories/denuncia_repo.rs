//! Repository for the `denuncias` table.

use sqlx::PgPool;
use seguridad_core::denuncia::procedure_minutes;
use seguridad_core::status::DenunciaStatus;
use seguridad_core::types::DbId;

use crate::error::DbError;
use crate::models::denuncia::{Denuncia, DenunciaFilter, NewDenuncia, UpdateDenuncia};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, reported_at, citizen_id, user_id, requerimiento_id, address, \
                        address_reference, quadrant, detail, cameras_visible, work_performed, \
                        arrival_at, ended_at, procedure_minutes, status_id, created_at, updated_at";

/// Provides CRUD operations for complaints.
pub struct DenunciaRepo;

impl DenunciaRepo {
    /// Insert a validated complaint, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewDenuncia) -> Result<Denuncia, sqlx::Error> {
        let query = format!(
            "INSERT INTO denuncias (reported_at, citizen_id, user_id, requerimiento_id, address, \
                                    address_reference, quadrant, detail, cameras_visible, \
                                    work_performed, arrival_at, ended_at, procedure_minutes, status_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Denuncia>(&query)
            .bind(input.reported_at)
            .bind(input.citizen_id)
            .bind(input.user_id)
            .bind(input.requerimiento_id)
            .bind(&input.address)
            .bind(&input.address_reference)
            .bind(input.quadrant)
            .bind(&input.detail)
            .bind(input.cameras_visible)
            .bind(&input.work_performed)
            .bind(input.arrival_at)
            .bind(input.ended_at)
            .bind(input.procedure_minutes)
            .bind(input.status_id)
            .fetch_one(pool)
            .await
    }

    /// Find a complaint by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Denuncia>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM denuncias WHERE id = $1");
        sqlx::query_as::<_, Denuncia>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List complaints, most recently reported first.
    pub async fn list(pool: &PgPool, filter: &DenunciaFilter) -> Result<Vec<Denuncia>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM denuncias
             WHERE ($1::SMALLINT IS NULL OR status_id = $1)
               AND ($2::BIGINT IS NULL OR requerimiento_id = $2)
               AND ($3::BIGINT IS NULL OR citizen_id = $3)
             ORDER BY reported_at DESC, id DESC"
        );
        sqlx::query_as::<_, Denuncia>(&query)
            .bind(filter.status_id)
            .bind(filter.requerimiento_id)
            .bind(filter.citizen_id)
            .fetch_all(pool)
            .await
    }

    /// Read-merge-write update with the row locked.
    ///
    /// `procedure_minutes` is recomputed from the merged `arrival_at` and
    /// `ended_at`; an end before the arrival or an unknown status is a
    /// validation error. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDenuncia,
    ) -> Result<Option<Denuncia>, DbError> {
        let mut tx = pool.begin().await?;
        let query = format!("SELECT {COLUMNS} FROM denuncias WHERE id = $1 FOR UPDATE");
        let current = sqlx::query_as::<_, Denuncia>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(current) = current else {
            return Ok(None);
        };

        let arrival_at = input.arrival_at.unwrap_or(current.arrival_at);
        let ended_at = input.ended_at.unwrap_or(current.ended_at);
        let minutes = procedure_minutes(arrival_at, ended_at)?;
        let status_id = match input.status_id {
            Some(status) => DenunciaStatus::from_id(status)?.id(),
            None => current.status_id,
        };

        let query = format!(
            "UPDATE denuncias SET
                reported_at = $2,
                citizen_id = $3,
                requerimiento_id = $4,
                address = $5,
                address_reference = $6,
                quadrant = $7,
                detail = $8,
                cameras_visible = $9,
                work_performed = $10,
                arrival_at = $11,
                ended_at = $12,
                procedure_minutes = $13,
                status_id = $14
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let denuncia = sqlx::query_as::<_, Denuncia>(&query)
            .bind(id)
            .bind(input.reported_at.unwrap_or(current.reported_at))
            .bind(input.citizen_id.unwrap_or(current.citizen_id))
            .bind(input.requerimiento_id.unwrap_or(current.requerimiento_id))
            .bind(input.address.as_ref().unwrap_or(&current.address))
            .bind(input.address_reference.as_ref().unwrap_or(&current.address_reference))
            .bind(input.quadrant.unwrap_or(current.quadrant))
            .bind(input.detail.as_ref().unwrap_or(&current.detail))
            .bind(input.cameras_visible.unwrap_or(current.cameras_visible))
            .bind(input.work_performed.as_ref().unwrap_or(&current.work_performed))
            .bind(arrival_at)
            .bind(ended_at)
            .bind(minutes)
            .bind(status_id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(denuncia)
    }

    /// Delete a complaint and its dispatch records. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM denuncias WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
