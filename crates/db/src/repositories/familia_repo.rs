//! Repository for the `familias` table, the root of the classification tree.

use sqlx::PgPool;
use seguridad_core::classification::Level;
use seguridad_core::types::DbId;

use crate::error::DbError;
use crate::models::classification::{Familia, UpdateFamilia};
use crate::repositories::tree::{self, Scope};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, code, created_at, updated_at";

const SCOPE: Scope = Scope {
    level: Level::Familia,
    table: "familias",
    parent: None,
};

/// Provides CRUD operations for familias.
pub struct FamiliaRepo;

impl FamiliaRepo {
    /// Insert a familia with a generated code. The name must already be
    /// validated and trimmed.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Familia, DbError> {
        let mut tx = pool.begin().await?;
        tree::lock_scope(&mut tx, &SCOPE).await?;
        tree::ensure_name_free(&mut tx, &SCOPE, name, None).await?;
        let code = tree::next_code(&mut tx, &SCOPE, name).await?;

        let query = format!(
            "INSERT INTO familias (name, code)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let familia = sqlx::query_as::<_, Familia>(&query)
            .bind(name)
            .bind(&code)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(familia)
    }

    /// Find a familia by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Familia>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM familias WHERE id = $1");
        sqlx::query_as::<_, Familia>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all familias ordered by code.
    pub async fn list(pool: &PgPool) -> Result<Vec<Familia>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM familias ORDER BY code");
        sqlx::query_as::<_, Familia>(&query).fetch_all(pool).await
    }

    /// Rename a familia. The code is left untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFamilia,
    ) -> Result<Option<Familia>, DbError> {
        let mut tx = pool.begin().await?;
        if let Some(name) = input.name.as_deref() {
            tree::lock_scope(&mut tx, &SCOPE).await?;
            tree::ensure_name_free(&mut tx, &SCOPE, name, Some(id)).await?;
        }

        let query = format!(
            "UPDATE familias SET name = COALESCE($2, name)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let familia = sqlx::query_as::<_, Familia>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(familia)
    }

    /// Delete a familia that has no grupos.
    ///
    /// Returns `Ok(false)` when the familia does not exist and a conflict
    /// when grupos still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, DbError> {
        let mut tx = pool.begin().await?;
        let exists: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM familias WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(false);
        }
        if tree::count_children(&mut tx, "grupos", "familia_id", id).await? > 0 {
            return Err(Level::Familia.has_children().into());
        }

        sqlx::query("DELETE FROM familias WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(true)
    }
}
