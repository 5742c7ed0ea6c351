//! Repository for the `grupos` table.

use sqlx::PgPool;
use seguridad_core::classification::Level;
use seguridad_core::types::DbId;

use crate::error::DbError;
use crate::models::classification::{Grupo, UpdateGrupo};
use crate::repositories::tree::{self, Scope};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, familia_id, name, code, created_at, updated_at";

fn scope(familia_id: DbId) -> Scope {
    Scope {
        level: Level::Grupo,
        table: "grupos",
        parent: Some(("familia_id", familia_id)),
    }
}

/// Provides CRUD operations for grupos.
pub struct GrupoRepo;

impl GrupoRepo {
    /// Insert a grupo under `familia_id` with a code scoped to that familia.
    pub async fn create(pool: &PgPool, familia_id: DbId, name: &str) -> Result<Grupo, DbError> {
        let scope = scope(familia_id);
        let mut tx = pool.begin().await?;
        tree::ensure_parent_exists(&mut tx, Level::Grupo, "familias", familia_id).await?;
        tree::lock_scope(&mut tx, &scope).await?;
        tree::ensure_name_free(&mut tx, &scope, name, None).await?;
        let code = tree::next_code(&mut tx, &scope, name).await?;

        let query = format!(
            "INSERT INTO grupos (familia_id, name, code)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let grupo = sqlx::query_as::<_, Grupo>(&query)
            .bind(familia_id)
            .bind(name)
            .bind(&code)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(grupo)
    }

    /// Find a grupo by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Grupo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM grupos WHERE id = $1");
        sqlx::query_as::<_, Grupo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List grupos, optionally only those of one familia.
    pub async fn list(pool: &PgPool, familia_id: Option<DbId>) -> Result<Vec<Grupo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM grupos
             WHERE ($1::BIGINT IS NULL OR familia_id = $1)
             ORDER BY familia_id, code"
        );
        sqlx::query_as::<_, Grupo>(&query)
            .bind(familia_id)
            .fetch_all(pool)
            .await
    }

    /// Rename a grupo. The code is left untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGrupo,
    ) -> Result<Option<Grupo>, DbError> {
        let mut tx = pool.begin().await?;
        let familia_id: Option<DbId> =
            sqlx::query_scalar("SELECT familia_id FROM grupos WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(familia_id) = familia_id else {
            return Ok(None);
        };
        if let Some(name) = input.name.as_deref() {
            let scope = scope(familia_id);
            tree::lock_scope(&mut tx, &scope).await?;
            tree::ensure_name_free(&mut tx, &scope, name, Some(id)).await?;
        }

        let query = format!(
            "UPDATE grupos SET name = COALESCE($2, name)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let grupo = sqlx::query_as::<_, Grupo>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(grupo)
    }

    /// Delete a grupo that has no subgrupos.
    ///
    /// Returns `Ok(false)` when the grupo does not exist and a conflict
    /// when subgrupos still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, DbError> {
        let mut tx = pool.begin().await?;
        let exists: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM grupos WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(false);
        }
        if tree::count_children(&mut tx, "subgrupos", "grupo_id", id).await? > 0 {
            return Err(Level::Grupo.has_children().into());
        }

        sqlx::query("DELETE FROM grupos WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(true)
    }
}
