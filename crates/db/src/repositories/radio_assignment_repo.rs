//! Repository for the `radio_assignments` table.

use chrono::NaiveDate;
use sqlx::PgPool;
use seguridad_core::types::DbId;

use crate::models::assignment::RadioAssignment;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, radio_id, assigned_on, returned_at, created_at, updated_at";

/// Provides operations for radio checkouts.
pub struct RadioAssignmentRepo;

impl RadioAssignmentRepo {
    /// Check a radio out to a user.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        radio_id: DbId,
        assigned_on: NaiveDate,
    ) -> Result<RadioAssignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO radio_assignments (user_id, radio_id, assigned_on)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RadioAssignment>(&query)
            .bind(user_id)
            .bind(radio_id)
            .bind(assigned_on)
            .fetch_one(pool)
            .await
    }

    /// Find a radio assignment by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RadioAssignment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM radio_assignments WHERE id = $1");
        sqlx::query_as::<_, RadioAssignment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List assignments, newest first, optionally for one user or radio.
    pub async fn list(
        pool: &PgPool,
        user_id: Option<DbId>,
        radio_id: Option<DbId>,
    ) -> Result<Vec<RadioAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM radio_assignments
             WHERE ($1::BIGINT IS NULL OR user_id = $1)
               AND ($2::BIGINT IS NULL OR radio_id = $2)
             ORDER BY assigned_on DESC, id DESC"
        );
        sqlx::query_as::<_, RadioAssignment>(&query)
            .bind(user_id)
            .bind(radio_id)
            .fetch_all(pool)
            .await
    }

    /// Record the radio as returned. Returning twice keeps the first timestamp.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn mark_returned(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RadioAssignment>, sqlx::Error> {
        let query = format!(
            "UPDATE radio_assignments SET returned_at = COALESCE(returned_at, NOW())
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RadioAssignment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an assignment. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM radio_assignments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
