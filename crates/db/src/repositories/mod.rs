//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod alert_repo;
pub mod ciudadano_repo;
pub mod citizen_request_repo;
pub mod dashboard_repo;
pub mod denuncia_referral_repo;
pub mod denuncia_repo;
pub mod denuncia_vehicle_repo;
pub mod emergency_service_repo;
pub mod familia_repo;
pub mod fiscalizacion_repo;
pub mod grupo_repo;
pub mod patrol_route_repo;
pub mod radio_assignment_repo;
pub mod radio_repo;
pub mod request_document_repo;
pub mod requerimiento_repo;
pub mod role_repo;
pub mod session_repo;
pub mod subgrupo_repo;
pub mod turno_repo;
pub mod user_repo;
pub mod vehicle_assignment_repo;
pub mod vehicle_repo;
pub mod vehicle_type_repo;
pub mod worker_request_repo;

mod dispatch_order;
mod tree;

pub use alert_repo::AlertRepo;
pub use ciudadano_repo::CiudadanoRepo;
pub use citizen_request_repo::CitizenRequestRepo;
pub use dashboard_repo::DashboardRepo;
pub use denuncia_referral_repo::{DenunciaReferralRepo, NewReferral};
pub use denuncia_repo::DenunciaRepo;
pub use denuncia_vehicle_repo::DenunciaVehicleRepo;
pub use emergency_service_repo::EmergencyServiceRepo;
pub use familia_repo::FamiliaRepo;
pub use fiscalizacion_repo::FiscalizacionRepo;
pub use grupo_repo::GrupoRepo;
pub use patrol_route_repo::PatrolRouteRepo;
pub use radio_assignment_repo::RadioAssignmentRepo;
pub use radio_repo::RadioRepo;
pub use request_document_repo::RequestDocumentRepo;
pub use requerimiento_repo::RequerimientoRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use subgrupo_repo::SubgrupoRepo;
pub use turno_repo::TurnoRepo;
pub use user_repo::UserRepo;
pub use vehicle_assignment_repo::VehicleAssignmentRepo;
pub use vehicle_repo::VehicleRepo;
pub use vehicle_type_repo::VehicleTypeRepo;
pub use worker_request_repo::WorkerRequestRepo;
