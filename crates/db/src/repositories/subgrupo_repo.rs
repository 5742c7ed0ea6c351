//! Repository for the `subgrupos` table.

use sqlx::PgPool;
use seguridad_core::classification::Level;
use seguridad_core::types::DbId;

use crate::error::DbError;
use crate::models::classification::{Subgrupo, UpdateSubgrupo};
use crate::repositories::tree::{self, Scope};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, grupo_id, name, code, created_at, updated_at";

fn scope(grupo_id: DbId) -> Scope {
    Scope {
        level: Level::Subgrupo,
        table: "subgrupos",
        parent: Some(("grupo_id", grupo_id)),
    }
}

/// Provides CRUD operations for subgrupos.
pub struct SubgrupoRepo;

impl SubgrupoRepo {
    /// Insert a subgrupo under `grupo_id` with a code scoped to that grupo.
    pub async fn create(pool: &PgPool, grupo_id: DbId, name: &str) -> Result<Subgrupo, DbError> {
        let scope = scope(grupo_id);
        let mut tx = pool.begin().await?;
        tree::ensure_parent_exists(&mut tx, Level::Subgrupo, "grupos", grupo_id).await?;
        tree::lock_scope(&mut tx, &scope).await?;
        tree::ensure_name_free(&mut tx, &scope, name, None).await?;
        let code = tree::next_code(&mut tx, &scope, name).await?;

        let query = format!(
            "INSERT INTO subgrupos (grupo_id, name, code)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let subgrupo = sqlx::query_as::<_, Subgrupo>(&query)
            .bind(grupo_id)
            .bind(name)
            .bind(&code)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(subgrupo)
    }

    /// Find a subgrupo by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Subgrupo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subgrupos WHERE id = $1");
        sqlx::query_as::<_, Subgrupo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List subgrupos, optionally only those of one grupo.
    pub async fn list(pool: &PgPool, grupo_id: Option<DbId>) -> Result<Vec<Subgrupo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subgrupos
             WHERE ($1::BIGINT IS NULL OR grupo_id = $1)
             ORDER BY grupo_id, code"
        );
        sqlx::query_as::<_, Subgrupo>(&query)
            .bind(grupo_id)
            .fetch_all(pool)
            .await
    }

    /// Rename a subgrupo. The code is left untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSubgrupo,
    ) -> Result<Option<Subgrupo>, DbError> {
        let mut tx = pool.begin().await?;
        let grupo_id: Option<DbId> =
            sqlx::query_scalar("SELECT grupo_id FROM subgrupos WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(grupo_id) = grupo_id else {
            return Ok(None);
        };
        if let Some(name) = input.name.as_deref() {
            let scope = scope(grupo_id);
            tree::lock_scope(&mut tx, &scope).await?;
            tree::ensure_name_free(&mut tx, &scope, name, Some(id)).await?;
        }

        let query = format!(
            "UPDATE subgrupos SET name = COALESCE($2, name)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let subgrupo = sqlx::query_as::<_, Subgrupo>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(subgrupo)
    }

    /// Delete a subgrupo that has no requerimientos.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, DbError> {
        let mut tx = pool.begin().await?;
        let exists: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM subgrupos WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(false);
        }
        if tree::count_children(&mut tx, "requerimientos", "subgrupo_id", id).await? > 0 {
            return Err(Level::Subgrupo.has_children().into());
        }

        sqlx::query("DELETE FROM subgrupos WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(true)
    }
}
