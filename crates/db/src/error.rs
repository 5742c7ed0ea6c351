//! Error type for repository operations that enforce domain rules inside
//! a transaction (code generation, read-merge-write updates).

use seguridad_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}
