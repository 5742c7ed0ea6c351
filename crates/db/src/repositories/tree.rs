//! Shared helpers for the four classification tables.
//!
//! Code generation runs inside the caller's transaction while holding a
//! transaction-scoped advisory lock for the parent scope, so concurrent
//! inserts under the same parent take turns. The `uq_*` constraints on
//! `(parent, code)` remain the last line of defence.

use sqlx::{PgConnection, Postgres, Transaction};
use seguridad_core::classification::{next_free_code, Level};
use seguridad_core::types::DbId;

use crate::error::DbError;

/// Where a classification node lives: its table and, below the root,
/// the parent column and id.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scope {
    pub level: Level,
    pub table: &'static str,
    pub parent: Option<(&'static str, DbId)>,
}

impl Scope {
    fn parent_id(&self) -> DbId {
        self.parent.map(|(_, id)| id).unwrap_or(0)
    }

    /// `WHERE` fragment restricting a query to the scope. The parent id is
    /// always bound as `$1`.
    fn filter(&self) -> String {
        match self.parent {
            Some((column, _)) => format!("{column} = $1"),
            None => "$1::BIGINT IS NOT NULL".to_string(),
        }
    }
}

/// Fail with the level's "parent does not exist" error when the parent row
/// is missing.
pub(crate) async fn ensure_parent_exists(
    conn: &mut PgConnection,
    level: Level,
    parent_table: &'static str,
    parent_id: DbId,
) -> Result<(), DbError> {
    let query = format!("SELECT EXISTS (SELECT 1 FROM {parent_table} WHERE id = $1)");
    let exists: bool = sqlx::query_scalar(&query)
        .bind(parent_id)
        .fetch_one(&mut *conn)
        .await?;
    if exists {
        Ok(())
    } else {
        Err(level.missing_parent().into())
    }
}

/// Take the advisory lock serializing writes in `scope` until the
/// transaction ends.
pub(crate) async fn lock_scope(
    tx: &mut Transaction<'_, Postgres>,
    scope: &Scope,
) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock($1, hashint8($2::BIGINT))")
        .bind(scope.level.lock_class())
        .bind(scope.parent_id())
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Fail with a conflict when a sibling (other than `exclude_id`) already
/// has this name, compared case-insensitively.
pub(crate) async fn ensure_name_free(
    conn: &mut PgConnection,
    scope: &Scope,
    name: &str,
    exclude_id: Option<DbId>,
) -> Result<(), DbError> {
    let query = format!(
        "SELECT EXISTS (
            SELECT 1 FROM {table}
            WHERE {filter} AND LOWER(name) = LOWER($2) AND ($3::BIGINT IS NULL OR id <> $3)
         )",
        table = scope.table,
        filter = scope.filter(),
    );
    let taken: bool = sqlx::query_scalar(&query)
        .bind(scope.parent_id())
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&mut *conn)
        .await?;
    if taken {
        Err(scope.level.duplicate_name(name).into())
    } else {
        Ok(())
    }
}

/// Compute the next free code for `name` in `scope`.
///
/// The sequence starts at the sibling count plus one and skips codes
/// already present in the scope.
pub(crate) async fn next_code(
    conn: &mut PgConnection,
    scope: &Scope,
    name: &str,
) -> Result<String, sqlx::Error> {
    let query = format!(
        "SELECT code FROM {table} WHERE {filter}",
        table = scope.table,
        filter = scope.filter(),
    );
    let taken: Vec<String> = sqlx::query_scalar(&query)
        .bind(scope.parent_id())
        .fetch_all(&mut *conn)
        .await?;
    let code = next_free_code(name, taken.len() as i64, &taken);
    tracing::debug!(level = scope.level.label(), %code, "Generated classification code");
    Ok(code)
}

/// Number of rows in `child_table` whose `parent_column` points at `id`.
pub(crate) async fn count_children(
    conn: &mut PgConnection,
    child_table: &'static str,
    parent_column: &'static str,
    id: DbId,
) -> Result<i64, sqlx::Error> {
    let query = format!("SELECT COUNT(*) FROM {child_table} WHERE {parent_column} = $1");
    sqlx::query_scalar(&query)
        .bind(id)
        .fetch_one(&mut *conn)
        .await
}
