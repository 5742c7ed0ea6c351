//! HTTP-level tests for complaints and their dispatch records (mobile
//! units and referrals).

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_ciudadano, create_requerimiento, create_user,
    create_vehicle, delete_auth, get_auth, operator_token, post_json_auth, put_json_auth,
};
use sqlx::PgPool;

/// Operator token plus a valid complaint payload.
async fn setup(pool: &PgPool) -> (String, serde_json::Value) {
    let token = operator_token(pool).await;
    let citizen = create_ciudadano(pool, "22222222-2", "vecino@mail.cl").await;
    let requerimiento = create_requerimiento(pool).await;
    let body = serde_json::json!({
        "citizen_id": citizen.id,
        "requerimiento_id": requerimiento.id,
        "address": "Av. Principal 123",
        "quadrant": 3,
        "detail": "Musica fuerte despues de medianoche",
    });
    (token, body)
}

async fn create_denuncia(pool: &PgPool, token: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json_auth(build_test_app(pool.clone()), "/api/v1/denuncias", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Denuncias
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_applies_defaults(pool: PgPool) {
    let (token, body) = setup(&pool).await;

    let json = create_denuncia(&pool, &token, body).await;

    assert_eq!(json["status_id"], 1, "new complaints start as received");
    assert_eq!(json["cameras_visible"], false);
    assert!(json["procedure_minutes"].is_null());
    assert!(json["reported_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_procedure_minutes_are_computed(pool: PgPool) {
    let (token, mut body) = setup(&pool).await;
    body["arrival_at"] = serde_json::json!("2025-03-14T10:00:00Z");
    body["ended_at"] = serde_json::json!("2025-03-14T10:45:59Z");

    let json = create_denuncia(&pool, &token, body).await;

    assert_eq!(json["procedure_minutes"], 45);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_end_before_arrival_is_rejected(pool: PgPool) {
    let (token, mut body) = setup(&pool).await;
    body["arrival_at"] = serde_json::json!("2025-03-14T11:00:00Z");
    body["ended_at"] = serde_json::json!("2025-03-14T10:00:00Z");

    let response = post_json_auth(build_test_app(pool), "/api/v1/denuncias", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_references_are_rejected(pool: PgPool) {
    let (token, body) = setup(&pool).await;

    let mut unknown_citizen = body.clone();
    unknown_citizen["citizen_id"] = serde_json::json!(999_999);
    let response = post_json_auth(build_test_app(pool.clone()), "/api/v1/denuncias", unknown_citizen, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut no_quadrant = body;
    no_quadrant.as_object_mut().unwrap().remove("quadrant");
    let response = post_json_auth(build_test_app(pool), "/api/v1/denuncias", no_quadrant, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_recomputes_duration(pool: PgPool) {
    let (token, body) = setup(&pool).await;
    let denuncia = create_denuncia(&pool, &token, body).await;
    let uri = format!("/api/v1/denuncias/{}", denuncia["id"]);

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "arrival_at": "2025-03-14T23:30:00Z" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["procedure_minutes"].is_null());

    let response = put_json_auth(
        build_test_app(pool),
        &uri,
        serde_json::json!({ "ended_at": "2025-03-15T01:30:00Z", "status_id": 3 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["procedure_minutes"], 120);
    assert_eq!(json["status_id"], 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_status(pool: PgPool) {
    let (token, body) = setup(&pool).await;
    create_denuncia(&pool, &token, body.clone()).await;
    let mut completed = body;
    completed["status_id"] = serde_json::json!(3);
    create_denuncia(&pool, &token, completed).await;

    let response = get_auth(build_test_app(pool.clone()), "/api/v1/denuncias?status_id=3", &token).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    let response = get_auth(build_test_app(pool), "/api/v1/denuncias", &token).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_denuncia(pool: PgPool) {
    let (token, body) = setup(&pool).await;
    let denuncia = create_denuncia(&pool, &token, body).await;
    let uri = format!("/api/v1/denuncias/{}", denuncia["id"]);

    let response = delete_auth(build_test_app(pool.clone()), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(build_test_app(pool), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dispatch_order_is_sequential(pool: PgPool) {
    let (token, body) = setup(&pool).await;
    let denuncia = create_denuncia(&pool, &token, body).await;
    let driver = create_user(&pool, "13333333-3", "chofer@muni.cl", "conductor").await;
    let first = create_vehicle(&pool, "ABCD12", 1000).await;
    let second = create_vehicle(&pool, "EFGH34", 2000).await;
    let uri = format!("/api/v1/denuncias/{}/moviles", denuncia["id"]);

    let mut orders = Vec::new();
    for vehicle in [&first, &second] {
        let response = post_json_auth(
            build_test_app(pool.clone()),
            &uri,
            serde_json::json!({ "vehicle_id": vehicle.id, "driver_id": driver.id }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        orders.push(body_json(response).await["assignment_order"].clone());
    }
    assert_eq!(orders, vec![serde_json::json!(1), serde_json::json!(2)]);

    // An explicit order already taken conflicts.
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "vehicle_id": first.id, "driver_id": driver.id, "assignment_order": 2 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error = body_json(response).await;
    assert_eq!(error["error"], "This assignment order is already used in the denuncia");
    assert!(!error["error"].as_str().unwrap().contains("uq_"));

    let response = get_auth(build_test_app(pool), &uri, &token).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dispatch_order_is_bounded(pool: PgPool) {
    let (token, body) = setup(&pool).await;
    let denuncia = create_denuncia(&pool, &token, body).await;
    let driver = create_user(&pool, "13333333-3", "chofer@muni.cl", "conductor").await;
    let vehicle = create_vehicle(&pool, "ABCD12", 0).await;
    let uri = format!("/api/v1/denuncias/{}/moviles", denuncia["id"]);

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &uri,
        serde_json::json!({
            "vehicle_id": vehicle.id,
            "driver_id": driver.id,
            "assignment_order": i32::MAX,
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let uri = format!("/api/v1/denuncias/{}/derivaciones", denuncia["id"]);
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "kind": "follow_up", "assignment_order": 10_001 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The bound itself is accepted.
    let response = post_json_auth(
        build_test_app(pool),
        &uri,
        serde_json::json!({ "kind": "follow_up", "assignment_order": 10_000 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["assignment_order"], 10_000);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dispatch_under_missing_denuncia(pool: PgPool) {
    let token = operator_token(&pool).await;
    let driver = create_user(&pool, "13333333-3", "chofer@muni.cl", "conductor").await;
    let vehicle = create_vehicle(&pool, "ABCD12", 0).await;

    let response = post_json_auth(
        build_test_app(pool),
        "/api/v1/denuncias/999999/moviles",
        serde_json::json!({ "vehicle_id": vehicle.id, "driver_id": driver.id }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_emergency_referral_needs_a_service(pool: PgPool) {
    let (token, body) = setup(&pool).await;
    let denuncia = create_denuncia(&pool, &token, body).await;
    let uri = format!("/api/v1/denuncias/{}/derivaciones", denuncia["id"]);

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "kind": "emergency" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "kind": "teleport" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "kind": " Follow_Up ", "notes": "Visitar manana" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let referral = body_json(response).await;
    assert_eq!(referral["assignment_order"], 1);
    assert_eq!(referral["kind"], "follow_up");

    let delete_uri = format!("{uri}/{}", referral["id"]);
    let response = delete_auth(build_test_app(pool), &delete_uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
