//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

use serde::{Deserialize, Deserializer};

pub mod assignment;
pub mod ciudadano;
pub mod classification;
pub mod dashboard;
pub mod denuncia;
pub mod dispatch;
pub mod emergency_service;
pub mod fiscalizacion;
pub mod intake;
pub mod patrol;
pub mod resource;
pub mod role;
pub mod session;
pub mod turno;
pub mod user;

/// Deserialize a nullable field so that an absent key and an explicit
/// `null` can be told apart.
///
/// Use with `#[serde(default, deserialize_with = "double_option")]` on an
/// `Option<Option<T>>` field: absent -> `None`, `null` -> `Some(None)`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
