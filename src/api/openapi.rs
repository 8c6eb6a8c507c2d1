use utoipa::OpenApi;

use crate::{
    api::models::{DoctorBookingRequest, ErrorResponse, LoginRequest, PatientBookingRequest, RegisterRequest},
    core::models::{
        Appointment, AppointmentStatus, DoctorAppointment, HistoryEntry, PatientAppointment, PatientHistory, Role,
        UserProfile,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::auth::register,
        super::handlers::auth::login,
        super::handlers::auth::me,
        super::handlers::auth::logout,
        super::handlers::doctor::create_appointment,
        super::handlers::doctor::list_appointments,
        super::handlers::doctor::list_doctors,
        super::handlers::doctor::update_appointment,
        super::handlers::doctor::cancel_appointment,
        super::handlers::doctor::delete_appointment,
        super::handlers::patient::create_appointment,
        super::handlers::patient::list_appointments,
        super::handlers::patient::list_patients,
        super::handlers::patient::patient_history,
        super::handlers::patient::update_appointment
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        DoctorBookingRequest,
        PatientBookingRequest,
        ErrorResponse,
        Role,
        UserProfile,
        AppointmentStatus,
        Appointment,
        DoctorAppointment,
        PatientAppointment,
        HistoryEntry,
        PatientHistory
    )),
    info(
        title = "MediBook API",
        description = "Patient and doctor appointment booking. Successful responses wrap the documented body \
                       as `data` in a `{success, message, data}` envelope; authenticated routes read the \
                       `token` session cookie.",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/auth/register",
            "/api/auth/login",
            "/api/auth/me",
            "/api/auth/logout",
            "/api/doctor",
            "/api/doctor/all",
            "/api/doctor/{id}",
            "/api/patient",
            "/api/patient/all",
            "/api/patient/{id}",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {}", expected);
        }
    }
}
