//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the signed-in staff member from the Bearer token.
//! - [`rbac::RequireAdmin`] -- administrators only.
//! - [`rbac::RequireStaff`] -- any back-office role.

pub mod auth;
pub mod rbac;
