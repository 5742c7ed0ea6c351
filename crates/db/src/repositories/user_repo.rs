//! Repository for the `users` table.

use sqlx::PgPool;
use seguridad_core::search::USER_SEARCH_LIMIT;
use seguridad_core::types::DbId;

use crate::models::user::{CreateUser, UpdateUser, User, UserResponse};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, rut, first_name, last_name_paternal, last_name_maternal, email, \
                        phone, password_hash, role_id, turno_id, is_active, last_login_at, \
                        created_at, updated_at";

/// Columns of [`UserResponse`], selected from `users u` joined with
/// `roles r` and `turnos t`.
const RESPONSE_COLUMNS: &str = "u.id, u.rut, u.first_name, u.last_name_paternal, \
                                 u.last_name_maternal, u.email, u.phone, u.role_id, \
                                 r.name AS role, u.turno_id, t.name AS turno, u.is_active, \
                                 u.last_login_at, u.created_at, u.updated_at";

const RESPONSE_FROM: &str = "users u \
                             JOIN roles r ON r.id = u.role_id \
                             LEFT JOIN turnos t ON t.id = u.turno_id";

/// Provides CRUD operations for staff users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row. Emails are stored lowercase.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (rut, first_name, last_name_paternal, last_name_maternal, \
                                email, phone, password_hash, role_id, turno_id)
             VALUES ($1, $2, $3, $4, LOWER($5), $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.rut)
            .bind(&input.first_name)
            .bind(&input.last_name_paternal)
            .bind(&input.last_name_maternal)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.password_hash)
            .bind(input.role_id)
            .bind(input.turno_id)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = LOWER($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email.trim())
            .fetch_optional(pool)
            .await
    }

    /// Whether another user (other than `exclude_id`) already uses the email.
    pub async fn email_taken(
        pool: &PgPool,
        email: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM users
                WHERE email = LOWER($1) AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(email.trim())
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// Whether another user (other than `exclude_id`) already uses the RUT.
    pub async fn rut_taken(
        pool: &PgPool,
        rut: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM users
                WHERE UPPER(rut) = UPPER($1) AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(rut)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// Fetch one user with role and turno names resolved.
    pub async fn find_response_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<UserResponse>, sqlx::Error> {
        let query = format!("SELECT {RESPONSE_COLUMNS} FROM {RESPONSE_FROM} WHERE u.id = $1");
        sqlx::query_as::<_, UserResponse>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all users with resolved role names, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<UserResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {RESPONSE_COLUMNS} FROM {RESPONSE_FROM} ORDER BY u.created_at DESC, u.id DESC"
        );
        sqlx::query_as::<_, UserResponse>(&query)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search over names, email and RUT.
    ///
    /// `pattern` is an already-escaped `ILIKE` pattern (see
    /// [`seguridad_core::search::like_pattern`]). At most
    /// [`USER_SEARCH_LIMIT`] rows are returned.
    pub async fn search(pool: &PgPool, pattern: &str) -> Result<Vec<UserResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {RESPONSE_COLUMNS} FROM {RESPONSE_FROM}
             WHERE u.first_name ILIKE $1
                OR u.last_name_paternal ILIKE $1
                OR u.last_name_maternal ILIKE $1
                OR u.email ILIKE $1
                OR u.rut ILIKE $1
             ORDER BY u.first_name, u.last_name_paternal, u.id
             LIMIT $2"
        );
        sqlx::query_as::<_, UserResponse>(&query)
            .bind(pattern)
            .bind(USER_SEARCH_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Update a user. Only non-`None` fields in `input` are applied;
    /// `turno_id: Some(None)` clears the shift.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let turno_provided = input.turno_id.is_some();
        let turno_value = input.turno_id.flatten();

        let query = format!(
            "UPDATE users SET
                rut = COALESCE($2, rut),
                first_name = COALESCE($3, first_name),
                last_name_paternal = COALESCE($4, last_name_paternal),
                last_name_maternal = COALESCE($5, last_name_maternal),
                email = COALESCE(LOWER($6), email),
                phone = COALESCE($7, phone),
                role_id = COALESCE($8, role_id),
                turno_id = CASE WHEN $9 THEN $10 ELSE turno_id END,
                is_active = COALESCE($11, is_active),
                password_hash = COALESCE($12, password_hash)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.rut)
            .bind(&input.first_name)
            .bind(&input.last_name_paternal)
            .bind(&input.last_name_maternal)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.role_id)
            .bind(turno_provided)
            .bind(turno_value)
            .bind(input.is_active)
            .bind(&input.password_hash)
            .fetch_optional(pool)
            .await
    }

    /// Record a successful login by setting `last_login_at` to now.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Number of complaint, dispatch and inspection records that reference
    /// the user. A user with any of these cannot be deleted.
    pub async fn count_dependents(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT
                (SELECT COUNT(*) FROM denuncias WHERE user_id = $1)
              + (SELECT COUNT(*) FROM denuncia_vehicles WHERE driver_id = $1)
              + (SELECT COUNT(*) FROM denuncia_referrals WHERE driver_id = $1)
              + (SELECT COUNT(*) FROM fiscalizaciones WHERE user_id = $1)",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Hard-delete a user. Sessions and resource checkouts cascade.
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
