//! Admin pages served as JSON view models.
//!
//! Each endpoint gathers everything one admin screen renders in a single
//! response.

use axum::extract::State;
use serde::Serialize;
use seguridad_db::models::classification::{Familia, Grupo, Requerimiento, Subgrupo};
use seguridad_db::models::dashboard::{DashboardCounts, DenunciaStatusCount, RequerimientoUsage};
use seguridad_db::models::role::Role;
use seguridad_db::models::turno::Turno;
use seguridad_db::models::user::UserResponse;
use seguridad_db::repositories::{
    DashboardRepo, FamiliaRepo, GrupoRepo, RequerimientoRepo, RoleRepo, SubgrupoRepo, TurnoRepo,
    UserRepo,
};

use crate::error::AppResult;
use crate::extract::Json;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardPage {
    pub counts: DashboardCounts,
    pub denuncias_by_status: Vec<DenunciaStatusCount>,
    pub top_requerimientos: Vec<RequerimientoUsage>,
}

/// User management screen: the user table plus the option lists its
/// forms need.
#[derive(Debug, Serialize)]
pub struct UsersPage {
    pub users: Vec<UserResponse>,
    pub roles: Vec<Role>,
    pub turnos: Vec<Turno>,
}

#[derive(Debug, Serialize)]
pub struct RequerimientosPage {
    pub familias: Vec<Familia>,
    pub grupos: Vec<Grupo>,
    pub subgrupos: Vec<Subgrupo>,
    pub requerimientos: Vec<Requerimiento>,
}

/// GET /api/v1/admin/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DashboardPage>> {
    let counts = DashboardRepo::counts(&state.pool).await?;
    let denuncias_by_status = DashboardRepo::denuncias_by_status(&state.pool).await?;
    let top_requerimientos = DashboardRepo::top_requerimientos(&state.pool).await?;
    Ok(Json(DashboardPage {
        counts,
        denuncias_by_status,
        top_requerimientos,
    }))
}

/// GET /api/v1/admin/usuarios
pub async fn usuarios(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<UsersPage>> {
    Ok(Json(UsersPage {
        users: UserRepo::list(&state.pool).await?,
        roles: RoleRepo::list(&state.pool).await?,
        turnos: TurnoRepo::list(&state.pool).await?,
    }))
}

/// GET /api/v1/admin/requerimientos
pub async fn requerimientos(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<RequerimientosPage>> {
    Ok(Json(RequerimientosPage {
        familias: FamiliaRepo::list(&state.pool).await?,
        grupos: GrupoRepo::list(&state.pool, None).await?,
        subgrupos: SubgrupoRepo::list(&state.pool, None).await?,
        requerimientos: RequerimientoRepo::list(&state.pool, None).await?,
    }))
}
