//! Repository for the `turnos` table.

use sqlx::PgPool;
use seguridad_core::types::DbId;

use crate::models::turno::{CreateTurno, Turno, UpdateTurno};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, start_time, end_time, created_at, updated_at";

/// Provides CRUD operations for work shifts.
pub struct TurnoRepo;

impl TurnoRepo {
    /// Insert a new turno, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTurno) -> Result<Turno, sqlx::Error> {
        let query = format!(
            "INSERT INTO turnos (name, start_time, end_time)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Turno>(&query)
            .bind(input.name.trim())
            .bind(input.start_time)
            .bind(input.end_time)
            .fetch_one(pool)
            .await
    }

    /// Find a turno by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Turno>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM turnos WHERE id = $1");
        sqlx::query_as::<_, Turno>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all turnos ordered by start time.
    pub async fn list(pool: &PgPool) -> Result<Vec<Turno>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM turnos ORDER BY start_time, name");
        sqlx::query_as::<_, Turno>(&query).fetch_all(pool).await
    }

    /// Update a turno. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTurno,
    ) -> Result<Option<Turno>, sqlx::Error> {
        let query = format!(
            "UPDATE turnos SET
                name = COALESCE($2, name),
                start_time = COALESCE($3, start_time),
                end_time = COALESCE($4, end_time)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Turno>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.start_time)
            .bind(input.end_time)
            .fetch_optional(pool)
            .await
    }

    /// Delete a turno. Users on the shift keep their account with no turno
    /// (`ON DELETE SET NULL`). Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM turnos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
