//! Repository for the `requerimientos` table, the leaves of the
//! classification tree.

use sqlx::PgPool;
use seguridad_core::classification::{Level, Severity};
use seguridad_core::error::CoreError;
use seguridad_core::types::DbId;

use crate::error::DbError;
use crate::models::classification::{
    Requerimiento, RequerimientoPath, RequerimientoPathRow, UpdateRequerimiento,
};
use crate::repositories::tree::{self, Scope};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, subgrupo_id, name, code, severity, description, created_at, updated_at";

fn scope(subgrupo_id: DbId) -> Scope {
    Scope {
        level: Level::Requerimiento,
        table: "requerimientos",
        parent: Some(("subgrupo_id", subgrupo_id)),
    }
}

/// Provides CRUD operations for requerimientos and the ancestor lookup.
pub struct RequerimientoRepo;

impl RequerimientoRepo {
    /// Insert a requerimiento under `subgrupo_id` with a code scoped to that
    /// subgrupo.
    pub async fn create(
        pool: &PgPool,
        subgrupo_id: DbId,
        name: &str,
        severity: Severity,
        description: &str,
    ) -> Result<Requerimiento, DbError> {
        let scope = scope(subgrupo_id);
        let mut tx = pool.begin().await?;
        tree::ensure_parent_exists(&mut tx, Level::Requerimiento, "subgrupos", subgrupo_id)
            .await?;
        tree::lock_scope(&mut tx, &scope).await?;
        tree::ensure_name_free(&mut tx, &scope, name, None).await?;
        let code = tree::next_code(&mut tx, &scope, name).await?;

        let query = format!(
            "INSERT INTO requerimientos (subgrupo_id, name, code, severity, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let requerimiento = sqlx::query_as::<_, Requerimiento>(&query)
            .bind(subgrupo_id)
            .bind(name)
            .bind(&code)
            .bind(severity.as_str())
            .bind(description)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(requerimiento)
    }

    /// Find a requerimiento by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Requerimiento>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM requerimientos WHERE id = $1");
        sqlx::query_as::<_, Requerimiento>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List requerimientos, optionally only those of one subgrupo.
    pub async fn list(
        pool: &PgPool,
        subgrupo_id: Option<DbId>,
    ) -> Result<Vec<Requerimiento>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM requerimientos
             WHERE ($1::BIGINT IS NULL OR subgrupo_id = $1)
             ORDER BY subgrupo_id, code"
        );
        sqlx::query_as::<_, Requerimiento>(&query)
            .bind(subgrupo_id)
            .fetch_all(pool)
            .await
    }

    /// Familia, grupo, subgrupo and requerimiento of `id` in one joined read.
    pub async fn find_path(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RequerimientoPath>, sqlx::Error> {
        let row = sqlx::query_as::<_, RequerimientoPathRow>(
            "SELECT f.id AS familia_id, f.name AS familia_name, f.code AS familia_code,
                    g.id AS grupo_id, g.name AS grupo_name, g.code AS grupo_code,
                    s.id AS subgrupo_id, s.name AS subgrupo_name, s.code AS subgrupo_code,
                    r.id AS requerimiento_id, r.name AS requerimiento_name,
                    r.code AS requerimiento_code, r.severity
             FROM requerimientos r
             JOIN subgrupos s ON s.id = r.subgrupo_id
             JOIN grupos g ON g.id = s.grupo_id
             JOIN familias f ON f.id = g.familia_id
             WHERE r.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(RequerimientoPath::from))
    }

    /// Update a requerimiento. Only non-`None` fields are applied; the code
    /// never changes, even when the requerimiento moves to another subgrupo.
    ///
    /// `severity` must already be normalized. Returns `None` if no row with
    /// the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRequerimiento,
    ) -> Result<Option<Requerimiento>, DbError> {
        let mut tx = pool.begin().await?;
        let current: Option<(DbId, String)> =
            sqlx::query_as("SELECT subgrupo_id, name FROM requerimientos WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((current_subgrupo, current_name)) = current else {
            return Ok(None);
        };

        let target_subgrupo = input.subgrupo_id.unwrap_or(current_subgrupo);
        if target_subgrupo != current_subgrupo {
            tree::ensure_parent_exists(&mut tx, Level::Requerimiento, "subgrupos", target_subgrupo)
                .await?;
        }
        if input.name.is_some() || target_subgrupo != current_subgrupo {
            let name = input.name.as_deref().unwrap_or(&current_name);
            let scope = scope(target_subgrupo);
            tree::lock_scope(&mut tx, &scope).await?;
            tree::ensure_name_free(&mut tx, &scope, name, Some(id)).await?;
        }

        let query = format!(
            "UPDATE requerimientos SET
                name = COALESCE($2, name),
                severity = COALESCE($3, severity),
                description = COALESCE($4, description),
                subgrupo_id = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let requerimiento = sqlx::query_as::<_, Requerimiento>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.severity)
            .bind(&input.description)
            .bind(target_subgrupo)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(requerimiento)
    }

    /// Delete a requerimiento that no complaint references.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, DbError> {
        let mut tx = pool.begin().await?;
        let exists: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM requerimientos WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(false);
        }
        if tree::count_children(&mut tx, "denuncias", "requerimiento_id", id).await? > 0 {
            return Err(CoreError::Conflict(
                "Cannot delete the requerimiento because denuncias are filed under it. \
                 Reclassify or remove those denuncias first."
                    .to_string(),
            )
            .into());
        }

        sqlx::query("DELETE FROM requerimientos WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(true)
    }
}
