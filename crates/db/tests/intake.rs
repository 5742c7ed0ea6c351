//! Integration tests for citizen and worker intake requests.

mod common;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use seguridad_core::error::CoreError;
use seguridad_core::status::RequestStatus;
use seguridad_db::error::DbError;
use seguridad_db::models::intake::{
    CreateCitizenRequest, CreateRequestDocument, CreateWorkerRequest, UpdateCitizenRequest,
    UpdateWorkerRequest,
};
use seguridad_db::repositories::{
    CitizenRequestRepo, RequestDocumentRepo, WorkerRequestRepo,
};
use sqlx::PgPool;

fn citizen_request() -> CreateCitizenRequest {
    CreateCitizenRequest {
        citizen_id: None,
        requester_kind: "vecino".to_string(),
        requester_name: "Pedro Munoz".to_string(),
        phone: Some("+56987654321".to_string()),
        email: "vecino@mail.cl".to_string(),
        rut: "22222222-2".to_string(),
        address: "Pasaje Los Aromos 45".to_string(),
        detail: "Request for a security camera review".to_string(),
    }
}

fn worker_request() -> CreateWorkerRequest {
    CreateWorkerRequest {
        user_id: None,
        requester_role: "inspector".to_string(),
        requester_name: "Ana Rojas".to_string(),
        phone: None,
        email: "ana@muni.cl".to_string(),
        rut: "12345678-9".to_string(),
        address: "Municipalidad".to_string(),
        detail: "Shift swap".to_string(),
        shift_date: None,
    }
}

fn status(to: RequestStatus) -> UpdateCitizenRequest {
    UpdateCitizenRequest {
        status_id: Some(to.id()),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Citizen requests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_citizen_request_review_workflow(pool: PgPool) {
    let citizen = common::create_ciudadano(&pool, "22222222-2", "vecino@mail.cl").await;
    let request = CitizenRequestRepo::create(&pool, citizen.id, &citizen_request())
        .await
        .unwrap();
    assert_eq!(request.status_id, RequestStatus::Pending.id());

    let reviewed = CitizenRequestRepo::update(&pool, request.id, &status(RequestStatus::InReview))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reviewed.status_id, RequestStatus::InReview.id());

    let err = CitizenRequestRepo::update(&pool, request.id, &status(RequestStatus::Pending))
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));

    let approved = CitizenRequestRepo::update(&pool, request.id, &status(RequestStatus::Approved))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(approved.status_id, RequestStatus::Approved.id());

    let err = CitizenRequestRepo::update(&pool, request.id, &status(RequestStatus::Rejected))
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_citizen_request_list_by_status(pool: PgPool) {
    let citizen = common::create_ciudadano(&pool, "22222222-2", "vecino@mail.cl").await;
    let first = CitizenRequestRepo::create(&pool, citizen.id, &citizen_request())
        .await
        .unwrap();
    CitizenRequestRepo::create(&pool, citizen.id, &citizen_request())
        .await
        .unwrap();
    CitizenRequestRepo::update(&pool, first.id, &status(RequestStatus::Rejected))
        .await
        .unwrap();

    let pending = CitizenRequestRepo::list(&pool, Some(RequestStatus::Pending.id()))
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(CitizenRequestRepo::list(&pool, None).await.unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_documents_cascade_with_request(pool: PgPool) {
    let citizen = common::create_ciudadano(&pool, "22222222-2", "vecino@mail.cl").await;
    let request = CitizenRequestRepo::create(&pool, citizen.id, &citizen_request())
        .await
        .unwrap();

    let document = RequestDocumentRepo::create(
        &pool,
        request.id,
        &CreateRequestDocument {
            file_name: "cedula.pdf".to_string(),
            file_type: "application/pdf".to_string(),
            file_path: "requests/1/cedula.pdf".to_string(),
            file_size: Some(20_480),
        },
    )
    .await
    .unwrap();
    assert_eq!(document.request_id, request.id);
    assert_eq!(
        RequestDocumentRepo::list_for_request(&pool, request.id)
            .await
            .unwrap()
            .len(),
        1
    );

    assert!(CitizenRequestRepo::delete(&pool, request.id).await.unwrap());
    assert!(RequestDocumentRepo::list_for_request(&pool, request.id)
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Worker requests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_worker_request_workflow(pool: PgPool) {
    let user = common::create_user(&pool, "12345678-9", "ana@muni.cl", "inspector").await;
    let shift = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
    let request = WorkerRequestRepo::create(&pool, user.id, shift, &worker_request())
        .await
        .unwrap();
    assert_eq!(request.shift_date, shift);
    assert_eq!(request.status_id, RequestStatus::Pending.id());

    let update = UpdateWorkerRequest {
        detail: Some("Shift swap with a colleague".to_string()),
        status_id: Some(RequestStatus::Approved.id()),
        ..Default::default()
    };
    let approved = WorkerRequestRepo::update(&pool, request.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(approved.status_id, RequestStatus::Approved.id());
    assert_eq!(approved.detail, "Shift swap with a colleague");

    let back = UpdateWorkerRequest {
        status_id: Some(RequestStatus::InReview.id()),
        ..Default::default()
    };
    let err = WorkerRequestRepo::update(&pool, request.id, &back)
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));

    assert!(WorkerRequestRepo::update(&pool, 9999, &back)
        .await
        .unwrap()
        .is_none());
}
