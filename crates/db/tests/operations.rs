//! Integration tests for inspections, patrol routes, alerts and the
//! dashboard aggregates.

mod common;

use chrono::Utc;
use seguridad_core::geo::Waypoint;
use seguridad_core::status::DenunciaStatus;
use seguridad_db::models::fiscalizacion::{CreateFiscalizacion, UpdateFiscalizacion};
use seguridad_db::repositories::{
    AlertRepo, DashboardRepo, FiscalizacionRepo, PatrolRouteRepo, UserRepo,
};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fiscalizacion_crud(pool: PgPool) {
    let inspector = common::create_user(&pool, "12345678-9", "insp@muni.cl", "inspector").await;
    let input = CreateFiscalizacion {
        inspected_at: None,
        kind: "control vehicular".to_string(),
        detail: "Expired permit".to_string(),
        driver_first_name: "Luis".to_string(),
        driver_last_name: "Perez".to_string(),
        driver_rut: "15555555-5".to_string(),
        vehicle_plate: "ABCD12".to_string(),
        user_id: None,
    };
    let created = FiscalizacionRepo::create(&pool, inspector.id, Utc::now(), &input)
        .await
        .unwrap();
    assert_eq!(created.user_id, inspector.id);
    assert_eq!(UserRepo::count_dependents(&pool, inspector.id).await.unwrap(), 1);

    let update = UpdateFiscalizacion {
        detail: Some("Expired permit, vehicle towed".to_string()),
        ..Default::default()
    };
    let updated = FiscalizacionRepo::update(&pool, created.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.detail, "Expired permit, vehicle towed");
    assert_eq!(updated.vehicle_plate, "ABCD12");

    assert_eq!(FiscalizacionRepo::list(&pool).await.unwrap().len(), 1);
    assert!(FiscalizacionRepo::delete(&pool, created.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patrol_route_stores_waypoints(pool: PgPool) {
    let waypoints = vec![
        Waypoint { lat: -33.45, lng: -70.66 },
        Waypoint { lat: -33.44, lng: -70.65 },
        Waypoint { lat: -33.43, lng: -70.64 },
    ];
    let route = PatrolRouteRepo::create(&pool, "Ronda centro", &waypoints)
        .await
        .unwrap();
    assert_eq!(route.waypoints.0, waypoints);

    let listed = PatrolRouteRepo::list(&pool).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].waypoints.0.len(), 3);

    assert!(PatrolRouteRepo::delete(&pool, route.id).await.unwrap());
    assert!(!PatrolRouteRepo::delete(&pool, route.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_single_waypoint_route_rejected_by_schema(pool: PgPool) {
    let result =
        PatrolRouteRepo::create(&pool, "Corta", &[Waypoint { lat: -33.45, lng: -70.66 }]).await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_alerts(pool: PgPool) {
    let alert = AlertRepo::create(&pool, "Fallen tree", "Blocking the road", -33.45, -70.66)
        .await
        .unwrap();
    assert_eq!(alert.latitude, -33.45);
    assert_eq!(AlertRepo::list(&pool).await.unwrap().len(), 1);
    assert!(AlertRepo::delete(&pool, alert.id).await.unwrap());

    assert!(AlertRepo::create(&pool, "Bad", "", 95.0, 0.0).await.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_aggregates(pool: PgPool) {
    let denuncia = common::create_denuncia(&pool).await;
    common::create_vehicle(&pool, "ABCD12", 0).await;

    let counts = DashboardRepo::counts(&pool).await.unwrap();
    assert_eq!(counts.users, 1);
    assert_eq!(counts.ciudadanos, 1);
    assert_eq!(counts.requerimientos, 1);
    assert_eq!(counts.denuncias, 1);
    assert_eq!(counts.open_denuncias, 1);
    assert_eq!(counts.vehicles_available, 1);
    assert_eq!(counts.pending_requests, 0);

    let by_status = DashboardRepo::denuncias_by_status(&pool).await.unwrap();
    assert_eq!(by_status.len(), 4);
    let received = by_status
        .iter()
        .find(|s| s.status_id == DenunciaStatus::Received.id())
        .unwrap();
    assert_eq!(received.count, 1);

    let top = DashboardRepo::top_requerimientos(&pool).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].requerimiento_id, denuncia.requerimiento_id);
}
