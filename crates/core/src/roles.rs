//! Well-known role name constants.
//!
//! These must match the seed data in `20260301000002_create_roles_and_turnos.sql`.
//! Role names are compared case-insensitively.

pub const ROLE_ADMIN: &str = "administrador";
pub const ROLE_OPERATOR: &str = "operador";
pub const ROLE_SUPERVISOR: &str = "supervisor";
pub const ROLE_INSPECTOR: &str = "inspector";
pub const ROLE_DRIVER: &str = "conductor";
pub const ROLE_CITIZEN: &str = "ciudadano";

/// Staff roles: the only roles allowed to sign in to the back office, and
/// the only roles whose users may be deleted.
pub const STAFF_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_OPERATOR, ROLE_SUPERVISOR, ROLE_INSPECTOR];

/// Whether `role` names the administrator role.
pub fn is_admin(role: &str) -> bool {
    role.eq_ignore_ascii_case(ROLE_ADMIN)
}

/// Whether `role` belongs to [`STAFF_ROLES`].
pub fn is_staff(role: &str) -> bool {
    STAFF_ROLES.iter().any(|r| r.eq_ignore_ascii_case(role))
}
