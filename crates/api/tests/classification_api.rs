//! HTTP-level tests for the familia > grupo > subgrupo > requerimiento
//! hierarchy: code generation, parent checks and guarded deletes.

mod common;

use axum::http::StatusCode;
use common::{admin_token, body_json, build_test_app, delete_auth, get_auth, post_json_auth, put_json_auth};
use sqlx::PgPool;

async fn create(pool: &PgPool, token: &str, uri: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json_auth(build_test_app(pool.clone()), uri, body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED, "POST {uri} should create");
    body_json(response).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_familia_codes_follow_sibling_count(pool: PgPool) {
    let token = admin_token(&pool).await;

    for name in ["Convivencia", "Transito", "Seguridad"] {
        create(&pool, &token, "/api/v1/familias", serde_json::json!({ "name": name })).await;
    }
    let fourth = create(
        &pool,
        &token,
        "/api/v1/familias",
        serde_json::json!({ "name": "Ruidos Molestos" }),
    )
    .await;

    assert_eq!(fourth["code"], "RUI004");
    assert_eq!(fourth["name"], "Ruidos Molestos");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_codes_are_scoped_to_the_parent(pool: PgPool) {
    let token = admin_token(&pool).await;
    let first = create(&pool, &token, "/api/v1/familias", serde_json::json!({ "name": "Convivencia" })).await;
    let second = create(&pool, &token, "/api/v1/familias", serde_json::json!({ "name": "Transito" })).await;

    let a = create(
        &pool,
        &token,
        "/api/v1/grupos",
        serde_json::json!({ "familia_id": first["id"], "name": "Ruidos" }),
    )
    .await;
    let b = create(
        &pool,
        &token,
        "/api/v1/grupos",
        serde_json::json!({ "familia_id": second["id"], "name": "Ruidos" }),
    )
    .await;

    assert_eq!(a["code"], "RUI001");
    assert_eq!(b["code"], "RUI001");

    let uri = format!("/api/v1/grupos?familia_id={}", first["id"]);
    let response = get_auth(build_test_app(pool), &uri, &token).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_sibling_name_conflicts(pool: PgPool) {
    let token = admin_token(&pool).await;
    create(&pool, &token, "/api/v1/familias", serde_json::json!({ "name": "Convivencia" })).await;

    let response = post_json_auth(
        build_test_app(pool),
        "/api/v1/familias",
        serde_json::json!({ "name": "Convivencia" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_name_is_rejected(pool: PgPool) {
    let token = admin_token(&pool).await;

    let response = post_json_auth(
        build_test_app(pool),
        "/api/v1/familias",
        serde_json::json!({ "name": "   " }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_requerimiento_under_missing_subgrupo(pool: PgPool) {
    let token = admin_token(&pool).await;

    let response = post_json_auth(
        build_test_app(pool),
        "/api/v1/requerimientos",
        serde_json::json!({ "subgrupo_id": 999_999, "name": "Musica alta" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(
        json["error"].as_str().unwrap().contains("subgrupo does not exist"),
        "unexpected message: {}",
        json["error"]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_requerimiento_path_and_defaults(pool: PgPool) {
    let token = admin_token(&pool).await;
    let familia = create(&pool, &token, "/api/v1/familias", serde_json::json!({ "name": "Convivencia" })).await;
    let grupo = create(
        &pool,
        &token,
        "/api/v1/grupos",
        serde_json::json!({ "familia_id": familia["id"], "name": "Ruidos" }),
    )
    .await;
    let subgrupo = create(
        &pool,
        &token,
        "/api/v1/subgrupos",
        serde_json::json!({ "grupo_id": grupo["id"], "name": "Fiestas" }),
    )
    .await;
    let requerimiento = create(
        &pool,
        &token,
        "/api/v1/requerimientos",
        serde_json::json!({ "subgrupo_id": subgrupo["id"], "name": "Musica alta" }),
    )
    .await;

    assert_eq!(requerimiento["code"], "MUS001");
    assert_eq!(requerimiento["severity"], "medium");

    let uri = format!("/api/v1/requerimientos/{}/path", requerimiento["id"]);
    let response = get_auth(build_test_app(pool), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["familia"]["code"], "CON001");
    assert_eq!(json["grupo"]["code"], "RUI001");
    assert_eq!(json["subgrupo"]["code"], "FIE001");
    assert_eq!(json["requerimiento"]["code"], "MUS001");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_with_children_conflicts(pool: PgPool) {
    let token = admin_token(&pool).await;
    let familia = create(&pool, &token, "/api/v1/familias", serde_json::json!({ "name": "Convivencia" })).await;
    let grupo = create(
        &pool,
        &token,
        "/api/v1/grupos",
        serde_json::json!({ "familia_id": familia["id"], "name": "Ruidos" }),
    )
    .await;

    let familia_uri = format!("/api/v1/familias/{}", familia["id"]);
    let response = delete_auth(build_test_app(pool.clone()), &familia_uri, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let grupo_uri = format!("/api/v1/grupos/{}", grupo["id"]);
    let response = delete_auth(build_test_app(pool.clone()), &grupo_uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(build_test_app(pool.clone()), &familia_uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(build_test_app(pool), &familia_uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rename_keeps_code(pool: PgPool) {
    let token = admin_token(&pool).await;
    let familia = create(&pool, &token, "/api/v1/familias", serde_json::json!({ "name": "Convivencia" })).await;

    let uri = format!("/api/v1/familias/{}", familia["id"]);
    let response = put_json_auth(
        build_test_app(pool),
        &uri,
        serde_json::json!({ "name": "Orden Publico" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Orden Publico");
    assert_eq!(json["code"], "CON001");
}
