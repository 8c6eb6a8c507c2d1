use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde_json::{Map, Value};

use crate::api::AppState;
use crate::api::models::{ApiError, ApiResponse, DoctorBookingRequest, ErrorResponse, ok, ok_empty};
use crate::core::models::{Appointment, DoctorAppointment, Role, UserProfile};
use crate::core::policy;

#[utoipa::path(
    post,
    path = "/api/doctor",
    request_body = DoctorBookingRequest,
    responses(
        (status = 200, description = "Appointment booked in PENDING", body = Appointment),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 403, description = "Not signed in as a doctor", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    Extension(caller): Extension<UserProfile>,
    payload: Result<Json<DoctorBookingRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Appointment>>, ApiError> {
    policy::require_role(&caller, Role::Doctor)?;
    let Json(req) = payload?;
    let (patient_id, details) = req.into_parts();
    let appointment = state.service.create_appointment(&caller, patient_id, details).await?;
    Ok(ok("appointment added successfully", appointment))
}

#[utoipa::path(
    get,
    path = "/api/doctor",
    responses(
        (status = 200, description = "The doctor's appointments with patient profiles", body = Vec<DoctorAppointment>),
        (status = 403, description = "Not signed in as a doctor", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_appointments(
    State(state): State<AppState>,
    Extension(caller): Extension<UserProfile>,
) -> Result<Json<ApiResponse<Vec<DoctorAppointment>>>, ApiError> {
    let appointments = state.service.list_doctor_appointments(&caller).await?;
    Ok(ok("appointments fetched successfully", appointments))
}

#[utoipa::path(
    get,
    path = "/api/doctor/all",
    responses(
        (status = 200, description = "Every doctor profile", body = Vec<UserProfile>),
        (status = 403, description = "Not signed in", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_doctors(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<UserProfile>>>, ApiError> {
    let doctors = state.service.list_users_by_role(Role::Doctor).await?;
    Ok(ok("doctors fetched successfully", doctors))
}

/// Body is a JSON object of the fields to change. Doctors may send `status`,
/// `date`, `time`, `reason` and `notes`; patients `date`, `time` and `reason`.
#[utoipa::path(
    put,
    path = "/api/doctor/{id}",
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

#[utoipa::path(
    patch,
    path = "/api/doctor/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment cancelled", body = Appointment),
        (status = 403, description = "Caller is not a participant", body = ErrorResponse),
        (status = 404, description = "Appointment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn cancel_appointment(
    State(state): State<AppState>,
    Extension(caller): Extension<UserProfile>,
    Path(appointment_id): Path<String>,
) -> Result<Json<ApiResponse<Appointment>>, ApiError> {
    let appointment = state.service.cancel_appointment(&caller, &appointment_id).await?;
    Ok(ok("appointment cancelled successfully", appointment))
}

#[utoipa::path(
    delete,
    path = "/api/doctor/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment deleted"),
        (status = 404, description = "Appointment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_appointment(
    State(state): State<AppState>,
    Extension(caller): Extension<UserProfile>,
    Path(appointment_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.service.delete_appointment(&caller, &appointment_id).await?;
    Ok(ok_empty("Appointment deleted successfully"))
}
