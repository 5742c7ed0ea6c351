//! Repository for the `emergency_services` table.

use sqlx::PgPool;
use seguridad_core::types::DbId;

use crate::models::emergency_service::{
    CreateEmergencyService, EmergencyService, UpdateEmergencyService,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, code, created_at, updated_at";

/// Provides CRUD operations for emergency services.
pub struct EmergencyServiceRepo;

impl EmergencyServiceRepo {
    /// Insert an emergency service, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateEmergencyService,
    ) -> Result<EmergencyService, sqlx::Error> {
        let query = format!(
            "INSERT INTO emergency_services (name, code)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmergencyService>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .fetch_one(pool)
            .await
    }

    /// Find an emergency service by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<EmergencyService>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM emergency_services WHERE id = $1");
        sqlx::query_as::<_, EmergencyService>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all emergency services ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<EmergencyService>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM emergency_services ORDER BY name");
        sqlx::query_as::<_, EmergencyService>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update an emergency service. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEmergencyService,
    ) -> Result<Option<EmergencyService>, sqlx::Error> {
        let query = format!(
            "UPDATE emergency_services SET
                name = COALESCE($2, name),
                code = COALESCE($3, code)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmergencyService>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.code)
            .fetch_optional(pool)
            .await
    }

    /// Number of complaint referrals that name the service.
    pub async fn count_referrals(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM denuncia_referrals WHERE emergency_service_id = $1",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Delete an emergency service. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM emergency_services WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
