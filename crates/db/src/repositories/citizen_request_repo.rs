//! Repository for the `citizen_requests` table.

use sqlx::PgPool;
use seguridad_core::intake::validate_transition;
use seguridad_core::status::StatusId;
use seguridad_core::types::DbId;

use crate::error::DbError;
use crate::models::intake::{CitizenRequest, CreateCitizenRequest, UpdateCitizenRequest};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, citizen_id, requester_kind, requester_name, phone, email, rut, \
                        address, detail, status_id, created_at, updated_at";

/// Provides CRUD operations for citizen requests.
pub struct CitizenRequestRepo;

impl CitizenRequestRepo {
    /// File a citizen request in `pending` status. `citizen_id` must be set.
    pub async fn create(
        pool: &PgPool,
        citizen_id: DbId,
        input: &CreateCitizenRequest,
    ) -> Result<CitizenRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO citizen_requests \
                (citizen_id, requester_kind, requester_name, phone, email, rut, address, detail)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CitizenRequest>(&query)
            .bind(citizen_id)
            .bind(&input.requester_kind)
            .bind(&input.requester_name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.rut)
            .bind(&input.address)
            .bind(&input.detail)
            .fetch_one(pool)
            .await
    }

    /// Find a citizen request by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CitizenRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM citizen_requests WHERE id = $1");
        sqlx::query_as::<_, CitizenRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List requests, newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status_id: Option<StatusId>,
    ) -> Result<Vec<CitizenRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM citizen_requests
             WHERE ($1::SMALLINT IS NULL OR status_id = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, CitizenRequest>(&query)
            .bind(status_id)
            .fetch_all(pool)
            .await
    }

    /// Update a request with the row locked. A status change must follow
    /// the review workflow. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCitizenRequest,
    ) -> Result<Option<CitizenRequest>, DbError> {
        let mut tx = pool.begin().await?;
        let current: Option<StatusId> =
            sqlx::query_scalar("SELECT status_id FROM citizen_requests WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(current_status) = current else {
            return Ok(None);
        };
        if let Some(next) = input.status_id {
            validate_transition(current_status, next)?;
        }

        let query = format!(
            "UPDATE citizen_requests SET
                requester_kind = COALESCE($2, requester_kind),
                requester_name = COALESCE($3, requester_name),
                phone = COALESCE($4, phone),
                email = COALESCE($5, email),
                address = COALESCE($6, address),
                detail = COALESCE($7, detail),
                status_id = COALESCE($8, status_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let request = sqlx::query_as::<_, CitizenRequest>(&query)
            .bind(id)
            .bind(&input.requester_kind)
            .bind(&input.requester_name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.address)
            .bind(&input.detail)
            .bind(input.status_id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(request)
    }

    /// Delete a request and its document metadata. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM citizen_requests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
