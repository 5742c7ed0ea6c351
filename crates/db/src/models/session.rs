use sqlx::FromRow;
use seguridad_core::types::{DbId, Timestamp};

/// A back-office session. The name and role are captured at sign-in so
/// `GET /auth/me` reflects what the token was issued for.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub display_name: String,
    pub role_name: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub display_name: String,
    pub role_name: String,
    pub expires_at: Timestamp,
}
