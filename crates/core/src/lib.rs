//! Domain logic for the citizen-security backend.
//!
//! Everything here is free of database and HTTP concerns so it can be unit
//! tested directly and shared by the repository and API layers.

pub mod classification;
pub mod denuncia;
pub mod error;
pub mod geo;
pub mod identity;
pub mod intake;
pub mod resources;
pub mod roles;
pub mod search;
pub mod status;
pub mod types;
