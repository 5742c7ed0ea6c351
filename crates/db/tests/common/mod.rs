//! Fixture builders shared by the repository integration tests.

#![allow(dead_code)]

use chrono::Utc;
use seguridad_core::classification::Severity;
use seguridad_core::status::DenunciaStatus;
use seguridad_core::types::DbId;
use seguridad_db::models::ciudadano::{Ciudadano, CreateCiudadano};
use seguridad_db::models::classification::Requerimiento;
use seguridad_db::models::denuncia::{Denuncia, NewDenuncia};
use seguridad_db::models::resource::{CreateVehicle, Vehicle};
use seguridad_db::models::user::{CreateUser, User};
use seguridad_db::repositories::{
    CiudadanoRepo, DenunciaRepo, FamiliaRepo, GrupoRepo, RequerimientoRepo, RoleRepo,
    SubgrupoRepo, UserRepo, VehicleRepo, VehicleTypeRepo,
};
use sqlx::PgPool;

pub async fn role_id(pool: &PgPool, name: &str) -> DbId {
    RoleRepo::find_by_name(pool, name)
        .await
        .unwrap()
        .unwrap_or_else(|| panic!("role {name} is seeded"))
        .id
}

pub fn new_user(rut: &str, email: &str, role_id: DbId) -> CreateUser {
    CreateUser {
        rut: rut.to_string(),
        first_name: "Ana".to_string(),
        last_name_paternal: "Rojas".to_string(),
        last_name_maternal: "Soto".to_string(),
        email: email.to_string(),
        phone: "+56912345678".to_string(),
        password_hash: "$argon2id$fake".to_string(),
        role_id,
        turno_id: None,
    }
}

pub async fn create_user(pool: &PgPool, rut: &str, email: &str, role: &str) -> User {
    let role_id = role_id(pool, role).await;
    UserRepo::create(pool, &new_user(rut, email, role_id))
        .await
        .unwrap()
}

pub async fn create_ciudadano(pool: &PgPool, rut: &str, email: &str) -> Ciudadano {
    let input = CreateCiudadano {
        rut: rut.to_string(),
        first_name: "Pedro".to_string(),
        last_name_paternal: "Munoz".to_string(),
        last_name_maternal: "Lagos".to_string(),
        email: email.to_string(),
        phone: "+56987654321".to_string(),
        password_hash: "$argon2id$fake".to_string(),
    };
    CiudadanoRepo::create(pool, &input).await.unwrap()
}

/// Build a familia -> grupo -> subgrupo -> requerimiento chain.
pub async fn create_requerimiento(pool: &PgPool) -> Requerimiento {
    let familia = FamiliaRepo::create(pool, "Convivencia").await.unwrap();
    let grupo = GrupoRepo::create(pool, familia.id, "Ruidos").await.unwrap();
    let subgrupo = SubgrupoRepo::create(pool, grupo.id, "Fiestas").await.unwrap();
    RequerimientoRepo::create(pool, subgrupo.id, "Musica alta", Severity::Medium, "")
        .await
        .unwrap()
}

pub fn new_denuncia(citizen_id: DbId, user_id: DbId, requerimiento_id: DbId) -> NewDenuncia {
    NewDenuncia {
        reported_at: Utc::now(),
        citizen_id,
        user_id,
        requerimiento_id,
        address: "Av. Principal 123".to_string(),
        address_reference: String::new(),
        quadrant: 1,
        detail: "Music after midnight".to_string(),
        cameras_visible: false,
        work_performed: String::new(),
        arrival_at: None,
        ended_at: None,
        procedure_minutes: None,
        status_id: DenunciaStatus::Received.id(),
    }
}

/// A complaint with fresh operator, citizen and classification rows.
pub async fn create_denuncia(pool: &PgPool) -> Denuncia {
    let user = create_user(pool, "11111111-1", "operador@muni.cl", "operador").await;
    let citizen = create_ciudadano(pool, "22222222-2", "vecino@mail.cl").await;
    let requerimiento = create_requerimiento(pool).await;
    DenunciaRepo::create(pool, &new_denuncia(citizen.id, user.id, requerimiento.id))
        .await
        .unwrap()
}

pub async fn create_vehicle(pool: &PgPool, plate: &str, odometer_total: i32) -> Vehicle {
    let vehicle_type = match VehicleTypeRepo::list(pool).await.unwrap().into_iter().next() {
        Some(existing) => existing,
        None => VehicleTypeRepo::create(pool, "Camioneta").await.unwrap(),
    };
    let input = CreateVehicle {
        plate: plate.to_string(),
        make: "Toyota".to_string(),
        model: "Hilux".to_string(),
        code: format!("M-{plate}"),
        vehicle_type_id: Some(vehicle_type.id),
        status_id: None,
        odometer_total: Some(odometer_total),
    };
    VehicleRepo::create(pool, &input).await.unwrap()
}
