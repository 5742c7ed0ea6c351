//! Repository for the `radios` table.

use sqlx::PgPool;
use seguridad_core::status::ResourceStatus;
use seguridad_core::types::DbId;

use crate::models::resource::{CreateRadio, Radio, UpdateRadio};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, code, description, status_id, created_at, updated_at";

/// Provides CRUD operations for radios.
pub struct RadioRepo;

impl RadioRepo {
    /// Insert a radio, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateRadio) -> Result<Radio, sqlx::Error> {
        let query = format!(
            "INSERT INTO radios (name, code, description, status_id)
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, $5))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Radio>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.description)
            .bind(input.status_id)
            .bind(ResourceStatus::Available.id())
            .fetch_one(pool)
            .await
    }

    /// Find a radio by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Radio>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM radios WHERE id = $1");
        sqlx::query_as::<_, Radio>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all radios ordered by code.
    pub async fn list(pool: &PgPool) -> Result<Vec<Radio>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM radios ORDER BY code");
        sqlx::query_as::<_, Radio>(&query).fetch_all(pool).await
    }

    /// Update a radio. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRadio,
    ) -> Result<Option<Radio>, sqlx::Error> {
        let query = format!(
            "UPDATE radios SET
                name = COALESCE($2, name),
                code = COALESCE($3, code),
                description = COALESCE($4, description),
                status_id = COALESCE($5, status_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Radio>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.description)
            .bind(input.status_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a radio and its checkout history. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM radios WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
