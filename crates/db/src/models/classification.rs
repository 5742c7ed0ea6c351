//! Classification tree models: familia -> grupo -> subgrupo -> requerimiento.
//!
//! Codes are generated on insert and never appear in update DTOs. String
//! fields of the create DTOs default to empty so that a missing field is
//! reported by name during validation instead of failing deserialization.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use seguridad_core::types::{DbId, Timestamp};

/// A row from the `familias` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Familia {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a familia.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFamilia {
    #[serde(default)]
    pub name: String,
}

/// DTO for renaming a familia.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFamilia {
    pub name: Option<String>,
}

/// A row from the `grupos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Grupo {
    pub id: DbId,
    pub familia_id: DbId,
    pub name: String,
    pub code: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a grupo under a familia.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGrupo {
    pub familia_id: Option<DbId>,
    #[serde(default)]
    pub name: String,
}

/// DTO for renaming a grupo.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGrupo {
    pub name: Option<String>,
}

/// A row from the `subgrupos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subgrupo {
    pub id: DbId,
    pub grupo_id: DbId,
    pub name: String,
    pub code: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a subgrupo under a grupo.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubgrupo {
    pub grupo_id: Option<DbId>,
    #[serde(default)]
    pub name: String,
}

/// DTO for renaming a subgrupo.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSubgrupo {
    pub name: Option<String>,
}

/// A row from the `requerimientos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Requerimiento {
    pub id: DbId,
    pub subgrupo_id: DbId,
    pub name: String,
    pub code: String,
    pub severity: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a requerimiento under a subgrupo.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequerimiento {
    pub subgrupo_id: Option<DbId>,
    #[serde(default)]
    pub name: String,
    /// `low`, `medium` or `high`; defaults to `medium`.
    pub severity: Option<String>,
    pub description: Option<String>,
}

/// DTO for updating a requerimiento. Moving it to another subgrupo keeps
/// its code.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRequerimiento {
    pub name: Option<String>,
    pub severity: Option<String>,
    pub description: Option<String>,
    pub subgrupo_id: Option<DbId>,
}

/// Id, name and code of one node on a classification path.
#[derive(Debug, Clone, Serialize)]
pub struct PathNode {
    pub id: DbId,
    pub name: String,
    pub code: String,
}

/// Flat result of the ancestor-chain join.
#[derive(Debug, Clone, FromRow)]
pub struct RequerimientoPathRow {
    pub familia_id: DbId,
    pub familia_name: String,
    pub familia_code: String,
    pub grupo_id: DbId,
    pub grupo_name: String,
    pub grupo_code: String,
    pub subgrupo_id: DbId,
    pub subgrupo_name: String,
    pub subgrupo_code: String,
    pub requerimiento_id: DbId,
    pub requerimiento_name: String,
    pub requerimiento_code: String,
    pub severity: String,
}

/// Full ancestor chain of a requerimiento.
#[derive(Debug, Clone, Serialize)]
pub struct RequerimientoPath {
    pub familia: PathNode,
    pub grupo: PathNode,
    pub subgrupo: PathNode,
    pub requerimiento: PathNode,
    pub severity: String,
}

impl From<RequerimientoPathRow> for RequerimientoPath {
    fn from(row: RequerimientoPathRow) -> Self {
        Self {
            familia: PathNode {
                id: row.familia_id,
                name: row.familia_name,
                code: row.familia_code,
            },
            grupo: PathNode {
                id: row.grupo_id,
                name: row.grupo_name,
                code: row.grupo_code,
            },
            subgrupo: PathNode {
                id: row.subgrupo_id,
                name: row.subgrupo_name,
                code: row.subgrupo_code,
            },
            requerimiento: PathNode {
                id: row.requerimiento_id,
                name: row.requerimiento_name,
                code: row.requerimiento_code,
            },
            severity: row.severity,
        }
    }
}
