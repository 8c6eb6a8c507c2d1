use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::core::errors::ClinicError;
use crate::core::models::{BookingDetails, Registration};

// Request structs for JSON payloads. Every field is optional so that missing
// values reach the services and come back as the domain's own validation message.
#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// `PATIENT` or `DOCTOR`
    pub role: Option<String>,
    pub specialization: Option<String>,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Registration {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
            specialization: req.specialization,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A doctor booking on behalf of a patient.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorBookingRequest {
    pub patient_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub reason: Option<String>,
}

/// A patient booking with a doctor.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientBookingRequest {
    pub doctor_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub reason: Option<String>,
}

impl DoctorBookingRequest {
    pub fn into_parts(self) -> (Option<String>, BookingDetails) {
        (
            self.patient_id,
            BookingDetails {
                date: self.date,
                time: self.time,
                reason: self.reason,
            },
        )
    }
}

impl PatientBookingRequest {
    pub fn into_parts(self) -> (Option<String>, BookingDetails) {
        (
            self.doctor_id,
            BookingDetails {
                date: self.date,
                time: self.time,
                reason: self.reason,
            },
        )
    }
}

/// Response envelope shared by every endpoint.
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

pub fn ok<T: Serialize>(message: impl Into<String>, data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        message: message.into(),
        data: Some(data),
    })
}

pub fn ok_empty(message: impl Into<String>) -> Json<ApiResponse<()>> {
    Json(ApiResponse {
        success: true,
        message: message.into(),
        data: None,
    })
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
}

const INTERNAL_MESSAGE: &str = "something went wrong from our end";

// Newtype wrapper for ClinicError to implement IntoResponse
#[derive(Debug)]
pub struct ApiError(pub ClinicError);

impl From<ClinicError> for ApiError {
    fn from(err: ClinicError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(ClinicError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self.0 {
            ClinicError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ClinicError::Unauthenticated(msg) => (StatusCode::FORBIDDEN, msg),
            ClinicError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ClinicError::InvalidCredentials => (StatusCode::UNAUTHORIZED, ClinicError::InvalidCredentials.to_string()),
            ClinicError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ClinicError::EmailTaken => (StatusCode::CONFLICT, ClinicError::EmailTaken.to_string()),
            err @ (ClinicError::Storage(_) | ClinicError::Internal(_)) => {
                error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
        };
        if status.is_client_error() {
            warn!(status = status.as_u16(), %message, "request rejected");
        }
        (
            status,
            Json(ErrorResponse {
                success: false,
                message,
                data: None,
            }),
        )
            .into_response()
    }
}
