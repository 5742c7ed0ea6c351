//! Environment-driven configuration.
//!
//! | Env var                  | Default                 |
//! |--------------------------|-------------------------|
//! | `HOST`                   | `0.0.0.0`               |
//! | `PORT`                   | `3000`                  |
//! | `CORS_ORIGINS`           | `http://localhost:5173` |
//! | `REQUEST_TIMEOUT_SECS`   | `30`                    |
//! | `SHUTDOWN_TIMEOUT_SECS`  | `30`                    |
//! | `DATABASE_URL`           | required                |
//! | `DB_MAX_CONNECTIONS`     | `20`                    |
//!
//! JWT settings are read by [`JwtConfig::from_env`]. Every loader panics on
//! a missing or unparsable value so a misconfigured deployment never
//! starts.

use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Front-end origins allowed by CORS.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Grace period for the database pool to close after shutdown.
    pub shutdown_timeout_secs: u64,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 3000),
            cors_origins: parse_origins(&env_or(
                "CORS_ORIGINS",
                "http://localhost:5173".to_string(),
            )),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 30),
            jwt: JwtConfig::from_env(),
        }
    }

    /// Address to bind. Panics when `HOST` is not an IP address.
    pub fn socket_addr(&self) -> SocketAddr {
        let ip: IpAddr = self
            .host
            .parse()
            .unwrap_or_else(|e| panic!("HOST '{}' is not an IP address: {e}", self.host));
        SocketAddr::new(ip, self.port)
    }
}

/// PostgreSQL connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            max_connections: env_or("DB_MAX_CONNECTIONS", 20),
        }
    }
}

/// Read and parse an optional variable, falling back to `default` when unset.
pub(crate) fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => parse_var(key, &raw),
        Err(_) => default,
    }
}

fn parse_var<T>(key: &str, raw: &str) -> T
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}"))
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
