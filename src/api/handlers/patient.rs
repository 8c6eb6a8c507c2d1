use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde_json::{Map, Value};

use crate::api::AppState;
use crate::api::models::{ApiError, ApiResponse, ErrorResponse, PatientBookingRequest, ok};
use crate::core::models::{Appointment, PatientAppointment, PatientHistory, Role, UserProfile};
use crate::core::policy;

#[utoipa::path(
    post,
    path = "/api/patient",
    request_body = PatientBookingRequest,
    responses(
        (status = 200, description = "Appointment booked in PENDING", body = Appointment),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 403, description = "Not signed in as a patient", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    Extension(caller): Extension<UserProfile>,
    payload: Result<Json<PatientBookingRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Appointment>>, ApiError> {
    policy::require_role(&caller, Role::Patient)?;
    let Json(req) = payload?;
    let (doctor_id, details) = req.into_parts();
    let appointment = state.service.create_appointment(&caller, doctor_id, details).await?;
    Ok(ok("appointment added successfully", appointment))
}

#[utoipa::path(
    get,
    path = "/api/patient",
    responses(
        (status = 200, description = "The patient's appointments with doctor profiles", body = Vec<PatientAppointment>),
        (status = 403, description = "Not signed in as a patient", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_appointments(
    State(state): State<AppState>,
    Extension(caller): Extension<UserProfile>,
) -> Result<Json<ApiResponse<Vec<PatientAppointment>>>, ApiError> {
    let appointments = state.service.list_patient_appointments(&caller).await?;
    Ok(ok("appointments fetched successfully", appointments))
}

#[utoipa::path(
    get,
    path = "/api/patient/all",
    responses(
        (status = 200, description = "Every patient profile", body = Vec<UserProfile>),
        (status = 403, description = "Not signed in", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_patients(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<UserProfile>>>, ApiError> {
    let patients = state.service.list_users_by_role(Role::Patient).await?;
    Ok(ok("patients fetched successfully", patients))
}

#[utoipa::path(
    get,
    path = "/api/patient/{id}",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient profile with appointment history", body = PatientHistory),
        (status = 404, description = "Patient not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn patient_history(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<ApiResponse<PatientHistory>>, ApiError> {
    let history = state.service.patient_history(&patient_id).await?;
    Ok(ok("patient fetched successfully", history))
}

/// Reschedule: a JSON object limited to the caller's allow-list.
#[utoipa::path(
    patch,
    path = "/api/patient/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment updated", body = Appointment),
        (status = 400, description = "Field outside the allow-list or wrong type", body = ErrorResponse),
        (status = 403, description = "Caller is not this appointment's patient or doctor", body = ErrorResponse),
        (status = 404, description = "Appointment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_appointment(
    State(state): State<AppState>,
    Extension(caller): Extension<UserProfile>,
    Path(appointment_id): Path<String>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<ApiResponse<Appointment>>, ApiError> {
    let Json(fields) = payload?;
    let appointment = state
        .service
        .update_appointment(&caller, &appointment_id, fields)
        .await?;
    Ok(ok("appointment updated successfully", appointment))
}
