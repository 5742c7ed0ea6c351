use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use seguridad_core::error::CoreError;
use seguridad_db::error::DbError;

/// PostgreSQL `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL `foreign_key_violation`.
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `seguridad_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(e) => AppError::Database(e),
            DbError::Core(e) => AppError::Core(e),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(errors.to_string()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string()),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations on `uq_*` constraints map to 409.
/// - Foreign key violations map to 409 (the row is still referenced, or
///   references something that went away).
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                Some(PG_UNIQUE_VIOLATION) if constraint.starts_with("uq_") => {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        duplicate_message(constraint).to_string(),
                    );
                }
                Some(PG_FOREIGN_KEY_VIOLATION) => {
                    tracing::warn!(constraint, "Foreign key violation");
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        "The record is referenced by or references other records".to_string(),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

/// Client-facing message for a `uq_*` violation. The constraint name is
/// only logged.
fn duplicate_message(constraint: &str) -> &'static str {
    tracing::info!(constraint, "Unique constraint violation");
    match constraint {
        "uq_users_rut" | "uq_ciudadanos_rut" => "A person with this RUT is already registered",
        "uq_users_email" | "uq_ciudadanos_email" => "This email is already registered",
        "uq_roles_name" => "A role with this name already exists",
        "uq_turnos_name" => "A turno with this name already exists",
        "uq_vehicle_types_name" => "A vehicle type with this name already exists",
        "uq_vehicles_plate" => "A vehicle with this plate already exists",
        "uq_radios_name" => "A radio with this name already exists",
        "uq_emergency_services_name" => "An emergency service with this name already exists",
        "uq_radios_code" | "uq_emergency_services_code" => "This code is already in use",
        "uq_vehicle_assignments_user_vehicle_date" => {
            "The user already has this vehicle assigned for that date"
        }
        "uq_radio_assignments_user_radio_date" => {
            "The user already has this radio assigned for that date"
        }
        "uq_familias_name" => "A familia with this name already exists",
        "uq_grupos_familia_name" | "uq_subgrupos_grupo_name" | "uq_requerimientos_subgrupo_name" => {
            "A sibling with this name already exists"
        }
        "uq_familias_code"
        | "uq_grupos_familia_code"
        | "uq_subgrupos_grupo_code"
        | "uq_requerimientos_subgrupo_code" => "The generated code is already taken, try again",
        "uq_denuncia_vehicles_denuncia_order" | "uq_denuncia_referrals_denuncia_order" => {
            "This assignment order is already used in the denuncia"
        }
        _ => "A record with these values already exists",
    }
}
