//! Repository for the `request_documents` table.

use sqlx::PgPool;
use seguridad_core::types::DbId;

use crate::models::intake::{CreateRequestDocument, RequestDocument};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, request_id, file_name, file_type, file_path, file_size, \
                        uploaded_at, created_at, updated_at";

/// Provides operations for document metadata attached to citizen requests.
pub struct RequestDocumentRepo;

impl RequestDocumentRepo {
    /// Attach document metadata to a request.
    pub async fn create(
        pool: &PgPool,
        request_id: DbId,
        input: &CreateRequestDocument,
    ) -> Result<RequestDocument, sqlx::Error> {
        let query = format!(
            "INSERT INTO request_documents (request_id, file_name, file_type, file_path, file_size)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RequestDocument>(&query)
            .bind(request_id)
            .bind(&input.file_name)
            .bind(&input.file_type)
            .bind(&input.file_path)
            .bind(input.file_size)
            .fetch_one(pool)
            .await
    }

    /// List the documents of a request, oldest first.
    pub async fn list_for_request(
        pool: &PgPool,
        request_id: DbId,
    ) -> Result<Vec<RequestDocument>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM request_documents
             WHERE request_id = $1
             ORDER BY uploaded_at, id"
        );
        sqlx::query_as::<_, RequestDocument>(&query)
            .bind(request_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a document record. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM request_documents WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
