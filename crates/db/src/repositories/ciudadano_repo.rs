//! Repository for the `ciudadanos` table.

use sqlx::PgPool;
use seguridad_core::types::DbId;

use crate::models::ciudadano::{Ciudadano, CreateCiudadano};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, rut, first_name, last_name_paternal, last_name_maternal, email, \
                        phone, password_hash, is_active, last_login_at, created_at, updated_at";

/// Provides operations for citizen accounts.
pub struct CiudadanoRepo;

impl CiudadanoRepo {
    /// Register a citizen. Emails are stored lowercase.
    pub async fn create(pool: &PgPool, input: &CreateCiudadano) -> Result<Ciudadano, sqlx::Error> {
        let query = format!(
            "INSERT INTO ciudadanos (rut, first_name, last_name_paternal, last_name_maternal, \
                                     email, phone, password_hash)
             VALUES ($1, $2, $3, $4, LOWER($5), $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ciudadano>(&query)
            .bind(&input.rut)
            .bind(&input.first_name)
            .bind(&input.last_name_paternal)
            .bind(&input.last_name_maternal)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a citizen by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ciudadano>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ciudadanos WHERE id = $1");
        sqlx::query_as::<_, Ciudadano>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a citizen with this email or RUT is already registered.
    pub async fn email_or_rut_taken(
        pool: &PgPool,
        email: &str,
        rut: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM ciudadanos
                WHERE email = LOWER($1) OR UPPER(rut) = UPPER($2)
             )",
        )
        .bind(email.trim())
        .bind(rut)
        .fetch_one(pool)
        .await
    }

    /// List all citizens, most recently registered first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Ciudadano>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ciudadanos ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Ciudadano>(&query).fetch_all(pool).await
    }
}
