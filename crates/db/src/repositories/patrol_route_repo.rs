//! Repository for the `patrol_routes` table.

use sqlx::types::Json;
use sqlx::PgPool;
use seguridad_core::geo::Waypoint;
use seguridad_core::types::DbId;

use crate::models::patrol::PatrolRoute;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, waypoints, created_at, updated_at";

/// Provides operations for patrol routes.
pub struct PatrolRouteRepo;

impl PatrolRouteRepo {
    /// Save a route with already-validated waypoints.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        waypoints: &[Waypoint],
    ) -> Result<PatrolRoute, sqlx::Error> {
        let query = format!(
            "INSERT INTO patrol_routes (name, waypoints)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PatrolRoute>(&query)
            .bind(name)
            .bind(Json(waypoints))
            .fetch_one(pool)
            .await
    }

    /// List all routes, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<PatrolRoute>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM patrol_routes ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, PatrolRoute>(&query)
            .fetch_all(pool)
            .await
    }

    /// Delete a route. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM patrol_routes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
