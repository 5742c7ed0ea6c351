use crate::types::DbId;

/// Domain failures, independent of transport. The API layer maps each
/// variant to an HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The addressed record does not exist (404).
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input breaks a field or business rule (400).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The request clashes with stored data, e.g. a duplicate code (409).
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// A required field is missing or blank.
    pub fn missing_field(field: &str) -> Self {
        CoreError::Validation(format!("The field '{field}' is required"))
    }

    /// A body field points at a record that does not exist. This is a 400,
    /// unlike [`CoreError::NotFound`] which is about the addressed record.
    pub fn unknown_reference(what: &str) -> Self {
        CoreError::Validation(format!("The {what} does not exist"))
    }
}
