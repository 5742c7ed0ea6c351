pub mod admin;
pub mod auth;
pub mod ciudadano;
pub mod classification;
pub mod denuncia;
pub mod field;
pub mod health;
pub mod resources;
pub mod solicitud;
pub mod staff;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login, /auth/refresh                     public
/// /auth/logout, /auth/me                         any authenticated user
/// /ciudadanos/register                           public
/// /ciudadanos, /ciudadanos/{id}                  staff
///
/// /familias, /grupos, /subgrupos, /requerimientos
///                                                read: staff, write: admin
/// /requerimientos/{id}/path                      staff
///
/// /usuarios, /usuarios/{id}                      admin
/// /usuarios/search?q=                            staff
/// /roles, /turnos, /vehicle-types, /vehiculos, /radios, /servicios-emergencia
///                                                read: staff, write: admin
///
/// /asignaciones/vehiculos, /asignaciones/radios  staff
/// /denuncias (+ /moviles, /derivaciones)         staff
/// /solicitudes/ciudadanos, /solicitudes/trabajadores
///                                                staff
/// /fiscalizaciones, /rutas, /alertas             staff
///
/// /admin/dashboard, /admin/usuarios, /admin/requerimientos
///                                                admin
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/ciudadanos", ciudadano::router())
        // Classification hierarchy.
        .nest("/familias", classification::familias_router())
        .nest("/grupos", classification::grupos_router())
        .nest("/subgrupos", classification::subgrupos_router())
        .nest("/requerimientos", classification::requerimientos_router())
        // Staff accounts and their lookups.
        .nest("/usuarios", staff::usuarios_router())
        .nest("/roles", staff::roles_router())
        .nest("/turnos", staff::turnos_router())
        // Vehicles, radios and who holds them.
        .nest("/vehicle-types", resources::vehicle_types_router())
        .nest("/vehiculos", resources::vehiculos_router())
        .nest("/radios", resources::radios_router())
        .nest("/asignaciones", resources::asignaciones_router())
        .nest("/servicios-emergencia", resources::emergency_services_router())
        // Complaints and dispatch.
        .nest("/denuncias", denuncia::router())
        .nest("/solicitudes", solicitud::router())
        .nest("/fiscalizaciones", field::fiscalizaciones_router())
        .nest("/rutas", field::rutas_router())
        .nest("/alertas", field::alertas_router())
        .nest("/admin", admin::router())
}
