//! Access tokens and refresh-token helpers.
//!
//! Access tokens are HS256 JWTs issued by `seguridad-ciudadana` and carry
//! the staff member's id, role and display name. Refresh tokens are opaque
//! UUIDs; the database only ever sees their SHA-256 digest.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use seguridad_core::types::DbId;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::env_or;

/// `iss` claim written into and required from every access token.
pub const TOKEN_ISSUER: &str = "seguridad-ciudadana";

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Staff user id.
    pub sub: DbId,
    /// Role name at sign-in time, e.g. `"administrador"`.
    pub role: String,
    pub name: String,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

/// Signing secret and token lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Reads `JWT_SECRET` (required, non-empty), `JWT_ACCESS_EXPIRY_MINS`
    /// (default 15) and `JWT_REFRESH_EXPIRY_DAYS` (default 7).
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self {
            secret,
            access_token_expiry_mins: env_or("JWT_ACCESS_EXPIRY_MINS", DEFAULT_ACCESS_EXPIRY_MINS),
            refresh_token_expiry_days: env_or("JWT_REFRESH_EXPIRY_DAYS", DEFAULT_REFRESH_EXPIRY_DAYS),
        }
    }

    pub fn access_ttl(&self) -> Duration {
        Duration::minutes(self.access_token_expiry_mins)
    }

    pub fn refresh_ttl(&self) -> Duration {
        Duration::days(self.refresh_token_expiry_days)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation
    }
}

/// Sign an access token for a staff user.
pub fn generate_access_token(
    user_id: DbId,
    role: &str,
    name: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        name: name.to_string(),
        iss: TOKEN_ISSUER.to_string(),
        exp: (now + config.access_ttl()).timestamp(),
        iat: now.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature, issuer and expiry, returning the embedded [`Claims`].
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &config.validation(),
    )
    .map(|data| data.claims)
}

/// Returns `(plaintext, sha256_hex)`. Only the hash is persisted.
pub fn generate_refresh_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let hash = hash_refresh_token(&plaintext);
    (plaintext, hash)
}

pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        }
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims_at(exp_offset_secs: i64, iss: &str) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: 1,
            role: "operador".to_string(),
            name: "Ana Rojas".to_string(),
            iss: iss.to_string(),
            exp: now + exp_offset_secs,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        }
    }

    #[test]
    fn issued_token_carries_name_role_and_issuer() {
        let cfg = config("seguridad-test-secret");
        let token = generate_access_token(7, "operador", "Ana Rojas", &cfg).unwrap();

        let claims = validate_token(&token, &cfg).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, "operador");
        assert_eq!(claims.name, "Ana Rojas");
        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn expired_token_is_rejected() {
        let cfg = config("seguridad-test-secret");
        // Past the default 60 second leeway.
        let token = sign(&claims_at(-300, TOKEN_ISSUER), &cfg.secret);
        assert!(validate_token(&token, &cfg).is_err());
    }

    #[test]
    fn foreign_issuer_is_rejected() {
        let cfg = config("seguridad-test-secret");
        let token = sign(&claims_at(300, "otra-app"), &cfg.secret);
        assert!(validate_token(&token, &cfg).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_access_token(1, "operador", "x", &config("alpha")).unwrap();
        assert!(validate_token(&token, &config("beta")).is_err());
    }

    #[test]
    fn refresh_tokens_are_stored_as_digests() {
        let (plain, hash) = generate_refresh_token();
        assert_ne!(plain, hash);
        assert_eq!(hash.len(), 64);
        assert_eq!(hash_refresh_token(&plain), hash);
    }
}
