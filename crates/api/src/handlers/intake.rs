//! Handlers for intake requests: `/solicitudes/ciudadanos` (with their
//! document metadata) and `/solicitudes/trabajadores`.
//!
//! Status changes follow the review workflow in
//! [`seguridad_core::intake`]; new requests always start pending.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::Utc;
use seguridad_core::error::CoreError;
use seguridad_core::identity::{require, validate_phone, validate_rut};
use seguridad_core::intake::validate_document;
use seguridad_core::status::RequestStatus;
use seguridad_core::types::DbId;
use seguridad_db::models::intake::{
    CitizenRequest, CreateCitizenRequest, CreateRequestDocument, CreateWorkerRequest,
    RequestDocument, UpdateCitizenRequest, UpdateWorkerRequest, WorkerRequest,
};
use seguridad_db::repositories::{
    CitizenRequestRepo, CiudadanoRepo, RequestDocumentRepo, UserRepo, WorkerRequestRepo,
};

use super::validate_email;
use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::RequireStaff;
use crate::query::StatusFilter;
use crate::state::AppState;

fn citizen_request_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "SolicitudCiudadano",
        id,
    })
}

fn worker_request_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "SolicitudTrabajador",
        id,
    })
}

fn validate_status_filter(filter: &StatusFilter) -> Result<(), CoreError> {
    filter.status_id.map(RequestStatus::from_id).transpose()?;
    Ok(())
}

/// Shared checks for the optional contact fields of an update.
fn validate_contact_update(
    phone: Option<&str>,
    email: Option<&str>,
) -> Result<(), CoreError> {
    if let Some(phone) = phone.filter(|p| !p.trim().is_empty()) {
        validate_phone(phone)?;
    }
    if let Some(email) = email {
        require("email", email)?;
        validate_email(email)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Citizen requests
// ---------------------------------------------------------------------------

/// POST /api/v1/solicitudes/ciudadanos
pub async fn create_citizen_request(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Json(input): Json<CreateCitizenRequest>,
) -> AppResult<(StatusCode, Json<CitizenRequest>)> {
    let citizen_id = input
        .citizen_id
        .ok_or_else(|| CoreError::missing_field("citizen_id"))?;
    for (field, value) in [
        ("requester_kind", &input.requester_kind),
        ("requester_name", &input.requester_name),
        ("email", &input.email),
        ("rut", &input.rut),
        ("address", &input.address),
        ("detail", &input.detail),
    ] {
        require(field, value)?;
    }
    validate_rut(&input.rut)?;
    validate_contact_update(input.phone.as_deref(), Some(input.email.as_str()))?;

    if CiudadanoRepo::find_by_id(&state.pool, citizen_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::unknown_reference("ciudadano")));
    }

    let request = CitizenRequestRepo::create(&state.pool, citizen_id, &input).await?;
    tracing::info!(request_id = request.id, citizen_id, "Citizen request filed");
    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /api/v1/solicitudes/ciudadanos?status_id=
pub async fn list_citizen_requests(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(filter): Query<StatusFilter>,
) -> AppResult<Json<Vec<CitizenRequest>>> {
    validate_status_filter(&filter)?;
    Ok(Json(
        CitizenRequestRepo::list(&state.pool, filter.status_id).await?,
    ))
}

/// GET /api/v1/solicitudes/ciudadanos/{id}
pub async fn get_citizen_request(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<CitizenRequest>> {
    let request = CitizenRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| citizen_request_not_found(id))?;
    Ok(Json(request))
}

/// PUT /api/v1/solicitudes/ciudadanos/{id}
pub async fn update_citizen_request(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCitizenRequest>,
) -> AppResult<Json<CitizenRequest>> {
    validate_contact_update(input.phone.as_deref(), input.email.as_deref())?;

    let request = CitizenRequestRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| citizen_request_not_found(id))?;
    if let Some(status_id) = input.status_id {
        tracing::info!(request_id = id, status_id, reviewed_by = staff.user_id, "Citizen request reviewed");
    }
    Ok(Json(request))
}

/// DELETE /api/v1/solicitudes/ciudadanos/{id}
///
/// Document metadata goes with it.
pub async fn delete_citizen_request(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CitizenRequestRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(citizen_request_not_found(id))
    }
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// GET /api/v1/solicitudes/ciudadanos/{id}/documentos
pub async fn list_documents(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(request_id): Path<DbId>,
) -> AppResult<Json<Vec<RequestDocument>>> {
    if CitizenRequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .is_none()
    {
        return Err(citizen_request_not_found(request_id));
    }
    Ok(Json(
        RequestDocumentRepo::list_for_request(&state.pool, request_id).await?,
    ))
}

/// POST /api/v1/solicitudes/ciudadanos/{id}/documentos
///
/// Records metadata only; the file itself is stored elsewhere.
pub async fn create_document(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(request_id): Path<DbId>,
    Json(input): Json<CreateRequestDocument>,
) -> AppResult<(StatusCode, Json<RequestDocument>)> {
    validate_document(&input.file_name, input.file_size)?;
    require("file_type", &input.file_type)?;
    require("file_path", &input.file_path)?;

    if CitizenRequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .is_none()
    {
        return Err(citizen_request_not_found(request_id));
    }

    let document = RequestDocumentRepo::create(&state.pool, request_id, &input).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// DELETE /api/v1/solicitudes/documentos/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if RequestDocumentRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "DocumentoSolicitud",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Worker requests
// ---------------------------------------------------------------------------

/// POST /api/v1/solicitudes/trabajadores
///
/// `user_id` defaults to the caller and `shift_date` to today (UTC).
pub async fn create_worker_request(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Json(input): Json<CreateWorkerRequest>,
) -> AppResult<(StatusCode, Json<WorkerRequest>)> {
    for (field, value) in [
        ("requester_role", &input.requester_role),
        ("requester_name", &input.requester_name),
        ("email", &input.email),
        ("rut", &input.rut),
        ("address", &input.address),
        ("detail", &input.detail),
    ] {
        require(field, value)?;
    }
    validate_rut(&input.rut)?;
    validate_contact_update(input.phone.as_deref(), Some(input.email.as_str()))?;

    let user_id = input.user_id.unwrap_or(staff.user_id);
    if UserRepo::find_by_id(&state.pool, user_id).await?.is_none() {
        return Err(AppError::Core(CoreError::unknown_reference("user")));
    }
    let shift_date = input.shift_date.unwrap_or_else(|| Utc::now().date_naive());

    let request = WorkerRequestRepo::create(&state.pool, user_id, shift_date, &input).await?;
    tracing::info!(request_id = request.id, user_id, "Worker request filed");
    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /api/v1/solicitudes/trabajadores?status_id=
pub async fn list_worker_requests(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(filter): Query<StatusFilter>,
) -> AppResult<Json<Vec<WorkerRequest>>> {
    validate_status_filter(&filter)?;
    Ok(Json(
        WorkerRequestRepo::list(&state.pool, filter.status_id).await?,
    ))
}

/// GET /api/v1/solicitudes/trabajadores/{id}
pub async fn get_worker_request(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<WorkerRequest>> {
    let request = WorkerRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| worker_request_not_found(id))?;
    Ok(Json(request))
}

/// PUT /api/v1/solicitudes/trabajadores/{id}
pub async fn update_worker_request(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWorkerRequest>,
) -> AppResult<Json<WorkerRequest>> {
    validate_contact_update(input.phone.as_deref(), input.email.as_deref())?;

    let request = WorkerRequestRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| worker_request_not_found(id))?;
    Ok(Json(request))
}

/// DELETE /api/v1/solicitudes/trabajadores/{id}
pub async fn delete_worker_request(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if WorkerRequestRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(worker_request_not_found(id))
    }
}
