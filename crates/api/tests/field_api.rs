//! HTTP-level tests for roadside inspections, patrol routes, map alerts
//! and the admin pages.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, build_test_app, create_ciudadano, delete_auth, get_auth,
    operator_token, post_json_auth, put_json_auth,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Fiscalizaciones
// ---------------------------------------------------------------------------

fn inspection() -> serde_json::Value {
    serde_json::json!({
        "kind": "control vehicular",
        "detail": "Sin documentos al dia",
        "driver_first_name": "Luis",
        "driver_last_name": "Araya",
        "driver_rut": "14444444-4",
        "vehicle_plate": "xy-zz 99",
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inspection_is_recorded(pool: PgPool) {
    let token = operator_token(&pool).await;

    let response = post_json_auth(build_test_app(pool.clone()), "/api/v1/fiscalizaciones", inspection(), &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["vehicle_plate"], "XYZZ99");
    assert!(json["inspected_at"].is_string());

    let uri = format!("/api/v1/fiscalizaciones/{}", json["id"]);
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "detail": "Documentos regularizados" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["detail"], "Documentos regularizados");

    let response = delete_auth(build_test_app(pool), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inspection_driver_rut_is_validated(pool: PgPool) {
    let token = operator_token(&pool).await;
    let mut body = inspection();
    body["driver_rut"] = serde_json::json!("14.444.444-4");

    let response = post_json_auth(build_test_app(pool), "/api/v1/fiscalizaciones", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Routes and alerts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patrol_routes(pool: PgPool) {
    let token = operator_token(&pool).await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/rutas",
        serde_json::json!({ "name": "Centro", "waypoints": [{ "lat": -33.45, "lng": -70.66 }] }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST, "one waypoint is not a route");

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/rutas",
        serde_json::json!({
            "name": "Centro",
            "waypoints": [{ "lat": -33.45, "lng": -70.66 }, { "lat": -33.44, "lng": -70.65 }],
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let route = body_json(response).await;
    assert_eq!(route["waypoints"].as_array().unwrap().len(), 2);

    let response = get_auth(build_test_app(pool.clone()), "/api/v1/rutas", &token).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let uri = format!("/api/v1/rutas/{}", route["id"]);
    let response = delete_auth(build_test_app(pool), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_alerts_need_valid_coordinates(pool: PgPool) {
    let token = operator_token(&pool).await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/alertas",
        serde_json::json!({ "title": "Choque", "latitude": -33.45 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/alertas",
        serde_json::json!({ "title": "Choque", "latitude": -95.0, "longitude": -70.66 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/alertas",
        serde_json::json!({ "title": "Choque", "latitude": -33.45, "longitude": -70.66 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let alert = body_json(response).await;
    assert_eq!(alert["detail"], "");

    let uri = format!("/api/v1/alertas/{}", alert["id"]);
    let response = delete_auth(build_test_app(pool.clone()), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(build_test_app(pool), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Admin pages
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_dashboard_counts(pool: PgPool) {
    let token = admin_token(&pool).await;
    create_ciudadano(&pool, "22222222-2", "vecino@mail.cl").await;

    let response = get_auth(build_test_app(pool), "/api/v1/admin/dashboard", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["counts"]["users"], 1);
    assert_eq!(json["counts"]["ciudadanos"], 1);
    assert_eq!(json["counts"]["denuncias"], 0);
    assert_eq!(
        json["denuncias_by_status"].as_array().unwrap().len(),
        4,
        "every status is listed even without complaints"
    );
    assert!(json["top_requerimientos"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_users_page_lists_options(pool: PgPool) {
    let token = admin_token(&pool).await;

    let response = get_auth(build_test_app(pool.clone()), "/api/v1/admin/usuarios", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["users"].as_array().unwrap().len(), 1);
    assert_eq!(json["roles"].as_array().unwrap().len(), 6);

    let response = get_auth(build_test_app(pool), "/api/v1/admin/requerimientos", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["familias"].as_array().unwrap().is_empty());
}
