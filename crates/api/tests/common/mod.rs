//! Shared helpers for the HTTP-level integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use seguridad_api::auth::jwt::JwtConfig;
use seguridad_api::auth::password::hash_password;
use seguridad_api::config::ServerConfig;
use seguridad_api::router::build_app_router;
use seguridad_api::state::AppState;
use seguridad_core::classification::Severity;
use seguridad_core::types::DbId;
use seguridad_db::models::ciudadano::{Ciudadano, CreateCiudadano};
use seguridad_db::models::classification::Requerimiento;
use seguridad_db::models::resource::{CreateVehicle, Vehicle};
use seguridad_db::models::user::{CreateUser, User};
use seguridad_db::repositories::{
    CiudadanoRepo, FamiliaRepo, GrupoRepo, RequerimientoRepo, RoleRepo, SubgrupoRepo, UserRepo,
    VehicleRepo, VehicleTypeRepo,
};
use sqlx::PgPool;
use tower::ServiceExt;

/// Plaintext password given to every user created by [`create_user`].
pub const TEST_PASSWORD: &str = "clave_segura_123";

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router, with the production middleware
/// stack, over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn role_id(pool: &PgPool, name: &str) -> DbId {
    RoleRepo::find_by_name(pool, name)
        .await
        .unwrap()
        .unwrap_or_else(|| panic!("role {name} is seeded"))
        .id
}

/// Insert a user holding `role` whose password is [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, rut: &str, email: &str, role: &str) -> User {
    let input = CreateUser {
        rut: rut.to_string(),
        first_name: "Ana".to_string(),
        last_name_paternal: "Rojas".to_string(),
        last_name_maternal: "Soto".to_string(),
        email: email.to_string(),
        phone: "+56912345678".to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role_id: role_id(pool, role).await,
        turno_id: None,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Log in through the API and return the full auth response.
pub async fn login(pool: &PgPool, email: &str) -> serde_json::Value {
    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let response = post_json(build_test_app(pool.clone()), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");
    body_json(response).await
}

/// Create a user with `role` and return a fresh access token for them.
pub async fn token_for(pool: &PgPool, rut: &str, email: &str, role: &str) -> String {
    create_user(pool, rut, email, role).await;
    let json = login(pool, email).await;
    json["access_token"].as_str().unwrap().to_string()
}

pub async fn admin_token(pool: &PgPool) -> String {
    token_for(pool, "10000000-1", "admin@muni.cl", "administrador").await
}

pub async fn operator_token(pool: &PgPool) -> String {
    token_for(pool, "10000001-K", "operador@muni.cl", "operador").await
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

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, None, Some(token)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(body), Some(token)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(body), Some(token)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, None, Some(token)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
