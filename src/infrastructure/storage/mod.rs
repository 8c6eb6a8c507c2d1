use crate::core::errors::ClinicError;
use crate::core::models::{Appointment, NewAppointment, NewUser, Role, User};
use async_trait::async_trait;

/// Credential store and appointment store. Ids are assigned by the store.
///
/// Every call is an independent operation: there are no transactions, so a
/// check followed by a write (email uniqueness, read-modify-write updates)
/// can race with a concurrent caller.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn insert_user(&self, user: NewUser) -> Result<User, ClinicError>;
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, ClinicError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, ClinicError>;
    async fn get_users_by_role(&self, role: Role) -> Result<Vec<User>, ClinicError>;

    async fn insert_appointment(&self, appointment: NewAppointment) -> Result<Appointment, ClinicError>;
    async fn get_appointment(&self, appointment_id: &str) -> Result<Option<Appointment>, ClinicError>;
    async fn get_appointments_by_doctor(&self, doctor_id: &str) -> Result<Vec<Appointment>, ClinicError>;
    async fn get_appointments_by_patient(&self, patient_id: &str) -> Result<Vec<Appointment>, ClinicError>;
    /// Replaces a stored appointment. Fails with `NotFound` if it no longer exists.
    async fn update_appointment(&self, appointment: Appointment) -> Result<(), ClinicError>;
    /// Returns whether a document was removed.
    async fn delete_appointment(&self, appointment_id: &str) -> Result<bool, ClinicError>;
}

pub mod in_memory;
