//! Back-office sessions (`user_sessions`).
//!
//! A session row backs one refresh token. Refresh tokens are single use:
//! presenting one claims the row (revoking it) in the same statement that
//! reads it, so two concurrent refreshes with the same token cannot both win.

use sqlx::PgPool;
use seguridad_core::types::DbId;

use crate::models::session::{CreateSession, UserSession};

const COLUMNS: &str = "id, user_id, refresh_token_hash, display_name, role_name, expires_at, \
                        is_revoked, created_at, updated_at";

/// Predicate for a session that can still be used.
const USABLE: &str = "is_revoked = false AND expires_at > NOW()";

pub struct SessionRepo;

impl SessionRepo {
    /// Open a session for a user who just authenticated.
    pub async fn open(pool: &PgPool, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, display_name, role_name, expires_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(&input.display_name)
            .bind(&input.role_name)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Consume the session behind a refresh token.
    ///
    /// Returns the session as it was before being revoked, or `None` when
    /// the token is unknown, expired or already used.
    pub async fn claim(pool: &PgPool, refresh_token_hash: &str) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "UPDATE user_sessions SET is_revoked = true
             WHERE refresh_token_hash = $1 AND {USABLE}
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(refresh_token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Newest usable session of a user.
    pub async fn latest_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE user_id = $1 AND {USABLE}
             ORDER BY created_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Revoke every session a user still holds (sign-out everywhere).
    pub async fn close_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let query = format!(
            "UPDATE user_sessions SET is_revoked = true WHERE user_id = $1 AND {USABLE}"
        );
        let result = sqlx::query(&query).bind(user_id).execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Delete a user's revoked and expired sessions.
    pub async fn prune_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM user_sessions
             WHERE user_id = $1 AND (is_revoked = true OR expires_at <= NOW())",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
