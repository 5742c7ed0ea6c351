//! HTTP handlers, one module per resource.

pub mod admin;
pub mod assignment;
pub mod auth;
pub mod ciudadano;
pub mod denuncia;
pub mod dispatch;
pub mod emergency_service;
pub mod familia;
pub mod fiscalizacion;
pub mod grupo;
pub mod intake;
pub mod patrol;
pub mod radio;
pub mod requerimiento;
pub mod role;
pub mod subgrupo;
pub mod turno;
pub mod user;
pub mod vehicle;
pub mod vehicle_type;

use seguridad_core::error::CoreError;
use validator::ValidateEmail;

/// Email format check for payloads that are not `#[derive(Validate)]`.
pub(crate) fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.trim().validate_email() {
        Ok(())
    } else {
        Err(CoreError::Validation("invalid email format".into()))
    }
}
