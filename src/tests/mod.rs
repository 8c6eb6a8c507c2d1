mod api_tests;

use std::sync::Arc;

use crate::api::AppState;
use crate::auth::jwt::JwtService;
use crate::core::models::{BookingDetails, Registration, UserProfile};
use crate::core::services::ClinicService;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub type TestService = ClinicService<InMemoryLogging, InMemoryStorage>;

pub const TEST_PASSWORD: &str = "correct horse battery staple";

pub fn create_test_service() -> TestService {
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    let jwt_service = JwtService::new("test-secret", chrono::Duration::days(14));
    // Lowest cost bcrypt accepts, keeps the suite fast.
    ClinicService::new(storage, logging, jwt_service, 4)
}

pub fn create_test_state() -> AppState {
    AppState {
        service: Arc::new(create_test_service()),
        cookie_secure: false,
    }
}

pub fn registration(name: &str, email: &str, role: &str) -> Registration {
    Registration {
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        password: Some(TEST_PASSWORD.to_string()),
        role: Some(role.to_string()),
        specialization: (role == "DOCTOR").then(|| "Cardiology".to_string()),
    }
}

pub async fn register_patient(service: &TestService, name: &str) -> UserProfile {
    let email = format!("{}@example.com", name.to_lowercase());
    service.register(registration(name, &email, "PATIENT")).await.unwrap()
}

pub async fn register_doctor(service: &TestService, name: &str) -> UserProfile {
    let email = format!("{}@clinic.example.com", name.to_lowercase());
    service.register(registration(name, &email, "DOCTOR")).await.unwrap()
}

pub fn booking(date: &str, time: &str, reason: &str) -> BookingDetails {
    BookingDetails {
        date: Some(date.to_string()),
        time: Some(time.to_string()),
        reason: Some(reason.to_string()),
    }
}
