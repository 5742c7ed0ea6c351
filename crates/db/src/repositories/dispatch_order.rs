//! Assignment-order allocation shared by the dispatch tables.

use sqlx::{Postgres, Transaction};
use seguridad_core::error::CoreError;
use seguridad_core::types::DbId;

use crate::error::DbError;

/// Resolve the assignment order for a new dispatch record.
///
/// Locks the parent complaint row so concurrent dispatches to the same
/// complaint are numbered one after another. An explicit order is used
/// as given; otherwise the next position after the current maximum.
pub(crate) async fn resolve(
    tx: &mut Transaction<'_, Postgres>,
    table: &'static str,
    denuncia_id: DbId,
    requested: Option<i32>,
) -> Result<i32, DbError> {
    let locked: Option<DbId> =
        sqlx::query_scalar("SELECT id FROM denuncias WHERE id = $1 FOR UPDATE")
            .bind(denuncia_id)
            .fetch_optional(&mut **tx)
            .await?;
    if locked.is_none() {
        return Err(CoreError::NotFound {
            entity: "Denuncia",
            id: denuncia_id,
        }
        .into());
    }

    if let Some(order) = requested {
        return Ok(order);
    }
    let query =
        format!("SELECT COALESCE(MAX(assignment_order), 0) + 1 FROM {table} WHERE denuncia_id = $1");
    let next: i32 = sqlx::query_scalar(&query)
        .bind(denuncia_id)
        .fetch_one(&mut **tx)
        .await?;
    Ok(next)
}
