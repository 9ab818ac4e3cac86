//! # API REST
//!
//! REST API implementation for the patient management system.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, status codes, CORS)
//!
//! Uses `api-shared` for wire types and `pms-core` for every data operation.

#![warn(rust_2018_idioms)]

mod error;

pub use error::ApiError;

use api_shared::{
    CreatePatientReq, ErrorRes, HealthRes, HealthService, MessageRes, PatientDirectoryRes,
    PatientRes, UpdatePatientReq,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use pms_core::{PatientError, PatientService};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use utoipa::{IntoParams, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across REST API handlers
#[derive(Clone)]
struct AppState {
    patient_service: PatientService,
}

/// Query string of `GET /sort`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortQuery {
    /// One of `height`, `weight`, `bmi`.
    sort_by: Option<String>,
    /// `asc` (default) or `desc`.
    order: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        hello,
        about,
        health,
        view,
        view_patient,
        sort_patients,
        create_patient,
        update_patient,
        delete_patient,
    ),
    components(schemas(
        HealthRes,
        MessageRes,
        ErrorRes,
        PatientRes,
        PatientDirectoryRes,
        CreatePatientReq,
        UpdatePatientReq,
    ))
)]
pub struct ApiDoc;

/// Build the REST router over `patient_service`.
///
/// Includes Swagger UI at `/swagger-ui` serving the document at `/api-docs/openapi.json`.
pub fn router(patient_service: PatientService) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/about", get(about))
        .route("/health", get(health))
        .route("/view", get(view))
        .route("/patient/:id", get(view_patient))
        .route("/sort", get(sort_patients))
        .route("/create", post(create_patient))
        .route("/edit/:id", put(update_patient))
        .route("/delete/:id", delete(delete_patient))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(AppState { patient_service })
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Greeting", body = MessageRes))
)]
async fn hello() -> Json<MessageRes> {
    Json(MessageRes::new("Patient Management System API"))
}

#[utoipa::path(
    get,
    path = "/about",
    responses((status = 200, description = "Service description", body = MessageRes))
)]
async fn about() -> Json<MessageRes> {
    Json(MessageRes::new(
        "A fully functional API to manage your patient records",
    ))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/view",
    responses(
        (status = 200, description = "Every patient keyed by identifier", body = PatientDirectoryRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List every patient, with derived BMI and verdict, keyed by identifier.
#[axum::debug_handler]
async fn view(State(state): State<AppState>) -> Result<Json<PatientDirectoryRes>, ApiError> {
    let patients = state.patient_service.list()?;
    Ok(Json(PatientDirectoryRes(
        patients
            .iter()
            .map(|(id, patient)| (id.to_string(), patient.to_res()))
            .collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/patient/{id}",
    params(("id" = String, Path, description = "Identifier of the patient")),
    responses(
        (status = 200, description = "Patient found", body = PatientRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn view_patient(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<PatientRes>, ApiError> {
    let Path(id) = id?;
    let patient = state.patient_service.get(&id)?;
    Ok(Json(patient.to_res()))
}

#[utoipa::path(
    get,
    path = "/sort",
    params(SortQuery),
    responses(
        (status = 200, description = "Patients in the requested order", body = [PatientRes]),
        (status = 400, description = "Invalid sort field or order", body = ErrorRes)
    )
)]
/// Sort every patient by height, weight or BMI.
///
/// # Errors
/// Returns `400 Bad Request` if `sort_by` is missing or not one of `height`, `weight`, `bmi`,
/// or if `order` is neither `asc` nor `desc`.
#[axum::debug_handler]
async fn sort_patients(
    State(state): State<AppState>,
    query: Result<Query<SortQuery>, QueryRejection>,
) -> Result<Json<Vec<PatientRes>>, ApiError> {
    let Query(query) = query?;
    let sort_by = query
        .sort_by
        .as_deref()
        .ok_or_else(|| PatientError::InvalidQuery("sort_by is required".into()))?;

    let sorted = state
        .patient_service
        .sort(sort_by, query.order.as_deref())?;
    Ok(Json(sorted.iter().map(|p| p.to_res()).collect()))
}

#[utoipa::path(
    post,
    path = "/create",
    request_body = CreatePatientReq,
    responses(
        (status = 201, description = "Patient created", body = MessageRes),
        (status = 400, description = "Patient already exists", body = ErrorRes),
        (status = 422, description = "Invalid patient record", body = ErrorRes)
    )
)]
/// Create a new patient record.
///
/// # Errors
/// Returns `400 Bad Request` if the identifier is taken and `422 Unprocessable Entity` if the
/// body is malformed or any field fails validation.
#[axum::debug_handler]
async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<CreatePatientReq>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageRes>), ApiError> {
    let Json(req) = payload?;
    state.patient_service.create(req)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageRes::new("patient created successfully")),
    ))
}

#[utoipa::path(
    put,
    path = "/edit/{id}",
    params(("id" = String, Path, description = "Identifier of the patient")),
    request_body = UpdatePatientReq,
    responses(
        (status = 200, description = "Patient updated", body = MessageRes),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 422, description = "Updated record is invalid", body = ErrorRes)
    )
)]
/// Apply a sparse update to an existing patient.
///
/// Only the keys present in the body are changed; BMI and verdict are recomputed.
#[axum::debug_handler]
async fn update_patient(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdatePatientReq>, JsonRejection>,
) -> Result<Json<MessageRes>, ApiError> {
    let Path(id) = id?;
    let Json(req) = payload?;
    state.patient_service.update(&id, req)?;
    Ok(Json(MessageRes::new("patient updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/delete/{id}",
    params(("id" = String, Path, description = "Identifier of the patient")),
    responses(
        (status = 200, description = "Patient deleted", body = MessageRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn delete_patient(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageRes>, ApiError> {
    let Path(id) = id?;
    state.patient_service.delete(&id)?;
    Ok(Json(MessageRes::new("patient deleted successfully")))
}
