//! Repository for the `alerts` table.

use sqlx::PgPool;
use seguridad_core::types::DbId;

use crate::models::patrol::Alert;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, detail, latitude, longitude, created_at, updated_at";

/// Provides operations for map alerts.
pub struct AlertRepo;

impl AlertRepo {
    /// Raise an alert at an already-validated position.
    pub async fn create(
        pool: &PgPool,
        title: &str,
        detail: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<Alert, sqlx::Error> {
        let query = format!(
            "INSERT INTO alerts (title, detail, latitude, longitude)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(title)
            .bind(detail)
            .bind(latitude)
            .bind(longitude)
            .fetch_one(pool)
            .await
    }

    /// List all alerts, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM alerts ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Alert>(&query).fetch_all(pool).await
    }

    /// Delete an alert. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM alerts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
