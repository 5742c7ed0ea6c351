//! Integration tests for staff users, roles, turnos and sessions.

mod common;

use chrono::{Duration, NaiveTime, Utc};
use seguridad_core::search::like_pattern;
use seguridad_db::models::session::CreateSession;
use seguridad_db::models::turno::CreateTurno;
use seguridad_db::models::user::UpdateUser;
use seguridad_db::repositories::{RoleRepo, SessionRepo, TurnoRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_user_lowercases_email(pool: PgPool) {
    let user = common::create_user(&pool, "12345678-9", "Ana.Rojas@Muni.CL", "operador").await;
    assert_eq!(user.email, "ana.rojas@muni.cl");

    let found = UserRepo::find_by_email(&pool, "ana.rojas@muni.cl")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, user.id);

    let response = UserRepo::find_response_by_id(&pool, user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(response.role, "operador");
    assert_eq!(response.turno, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_email_and_rut_taken(pool: PgPool) {
    let user = common::create_user(&pool, "12345678-9", "ana@muni.cl", "operador").await;

    assert!(UserRepo::email_taken(&pool, "ANA@muni.cl", None).await.unwrap());
    assert!(!UserRepo::email_taken(&pool, "ana@muni.cl", Some(user.id))
        .await
        .unwrap());
    assert!(UserRepo::rut_taken(&pool, "12345678-9", None).await.unwrap());
    assert!(!UserRepo::rut_taken(&pool, "87654321-K", None).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_rut_is_rejected_by_schema(pool: PgPool) {
    let role_id = common::role_id(&pool, "operador").await;
    let result = UserRepo::create(&pool, &common::new_user("12.345.678-9", "x@muni.cl", role_id)).await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_is_case_insensitive_and_limited(pool: PgPool) {
    for i in 0..12 {
        let rut = format!("{:08}-{}", 10_000_000 + i, i % 10);
        common::create_user(&pool, &rut, &format!("user{i}@muni.cl"), "operador").await;
    }

    let pattern = like_pattern("ROJAS").unwrap();
    let results = UserRepo::search(&pool, &pattern).await.unwrap();
    assert_eq!(results.len(), 10);

    let pattern = like_pattern("user11@").unwrap();
    let results = UserRepo::search(&pool, &pattern).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].email, "user11@muni.cl");

    let pattern = like_pattern("nobody").unwrap();
    assert!(UserRepo::search(&pool, &pattern).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_sets_and_clears_turno(pool: PgPool) {
    let user = common::create_user(&pool, "12345678-9", "ana@muni.cl", "operador").await;
    let turno = TurnoRepo::create(
        &pool,
        &CreateTurno {
            name: "Noche".to_string(),
            start_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
        },
    )
    .await
    .unwrap();

    let update = UpdateUser {
        turno_id: Some(Some(turno.id)),
        phone: Some("+56911112222".to_string()),
        ..Default::default()
    };
    let updated = UserRepo::update(&pool, user.id, &update).await.unwrap().unwrap();
    assert_eq!(updated.turno_id, Some(turno.id));
    assert_eq!(updated.phone, "+56911112222");

    // Absent turno leaves it untouched.
    let update = UpdateUser {
        first_name: Some("Ana Maria".to_string()),
        ..Default::default()
    };
    let updated = UserRepo::update(&pool, user.id, &update).await.unwrap().unwrap();
    assert_eq!(updated.turno_id, Some(turno.id));

    let update = UpdateUser {
        turno_id: Some(None),
        ..Default::default()
    };
    let updated = UserRepo::update(&pool, user.id, &update).await.unwrap().unwrap();
    assert_eq!(updated.turno_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_user_without_dependents(pool: PgPool) {
    let user = common::create_user(&pool, "12345678-9", "ana@muni.cl", "operador").await;
    assert_eq!(UserRepo::count_dependents(&pool, user.id).await.unwrap(), 0);
    assert!(UserRepo::delete(&pool, user.id).await.unwrap());
    assert!(UserRepo::find_by_id(&pool, user.id).await.unwrap().is_none());
    assert!(!UserRepo::delete(&pool, user.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seeded_roles(pool: PgPool) {
    let names: Vec<String> = RoleRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    for expected in ["administrador", "operador", "supervisor", "inspector", "conductor", "ciudadano"] {
        assert!(names.iter().any(|n| n == expected), "missing role {expected}");
    }

    let admin = RoleRepo::find_by_name(&pool, "Administrador").await.unwrap();
    assert!(admin.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_role_user_count(pool: PgPool) {
    let role_id = common::role_id(&pool, "inspector").await;
    assert_eq!(RoleRepo::count_users(&pool, role_id).await.unwrap(), 0);
    common::create_user(&pool, "12345678-9", "ana@muni.cl", "inspector").await;
    assert_eq!(RoleRepo::count_users(&pool, role_id).await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

fn session_for(user_id: i64, hash: &str, expires_at: chrono::DateTime<Utc>) -> CreateSession {
    CreateSession {
        user_id,
        refresh_token_hash: hash.to_string(),
        display_name: "Ana Rojas".to_string(),
        role_name: "operador".to_string(),
        expires_at,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_token_is_single_use(pool: PgPool) {
    let user = common::create_user(&pool, "12345678-9", "ana@muni.cl", "operador").await;
    let session = SessionRepo::open(&pool, &session_for(user.id, "hash-1", Utc::now() + Duration::days(7)))
        .await
        .unwrap();
    assert!(!session.is_revoked);

    let latest = SessionRepo::latest_for_user(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(latest.display_name, "Ana Rojas");

    let claimed = SessionRepo::claim(&pool, "hash-1").await.unwrap().unwrap();
    assert_eq!(claimed.id, session.id);
    assert!(SessionRepo::claim(&pool, "hash-1").await.unwrap().is_none());
    assert!(SessionRepo::latest_for_user(&pool, user.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_session_cannot_be_claimed(pool: PgPool) {
    let user = common::create_user(&pool, "12345678-9", "ana@muni.cl", "operador").await;
    SessionRepo::open(&pool, &session_for(user.id, "stale", Utc::now() - Duration::minutes(1)))
        .await
        .unwrap();
    SessionRepo::open(&pool, &session_for(user.id, "fresh", Utc::now() + Duration::days(1)))
        .await
        .unwrap();

    assert!(SessionRepo::claim(&pool, "stale").await.unwrap().is_none());
    // Only the fresh session was still usable.
    assert_eq!(SessionRepo::close_all_for_user(&pool, user.id).await.unwrap(), 1);
    assert_eq!(SessionRepo::prune_for_user(&pool, user.id).await.unwrap(), 2);
}
