use crate::core::errors::ClinicError;
use crate::core::models::{Appointment, AppointmentStatus, NewAppointment, NewUser, Role, User};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    users: Arc<RwLock<HashMap<String, User>>>,
    appointments: Arc<RwLock<HashMap<String, Appointment>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            users: Arc::new(RwLock::new(HashMap::new())),
            appointments: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn appointments_where<F>(&self, predicate: F) -> Vec<Appointment>
    where
        F: Fn(&Appointment) -> bool,
    {
        let appointments = self.appointments.read().await;
        let mut matching: Vec<Appointment> = appointments.values().filter(|a| predicate(a)).cloned().collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        matching
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn insert_user(&self, user: NewUser) -> Result<User, ClinicError> {
        // No uniqueness constraint here, callers pre-check the email.
        let stored = User {
            id: Uuid::new_v4().to_string(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            specialization: user.specialization,
            is_first_login: true,
            created_at: Utc::now(),
        };
        let mut users = self.users.write().await;
        users.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, ClinicError> {
        let users = self.users.read().await;
        Ok(users.get(user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, ClinicError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn get_users_by_role(&self, role: Role) -> Result<Vec<User>, ClinicError> {
        let users = self.users.read().await;
        let mut matching: Vec<User> = users.values().filter(|u| u.role == role).cloned().collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(matching)
    }

    async fn insert_appointment(&self, appointment: NewAppointment) -> Result<Appointment, ClinicError> {
        let now = Utc::now();
        let stored = Appointment {
            id: Uuid::new_v4().to_string(),
            patient_id: appointment.patient_id,
            doctor_id: appointment.doctor_id,
            date: appointment.date,
            time: appointment.time,
            reason: appointment.reason,
            status: AppointmentStatus::Pending,
            notes: None,
            created_at: now,
            updated_at: now,
            cancelled_at: None,
        };
        let mut appointments = self.appointments.write().await;
        appointments.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn get_appointment(&self, appointment_id: &str) -> Result<Option<Appointment>, ClinicError> {
        let appointments = self.appointments.read().await;
        Ok(appointments.get(appointment_id).cloned())
    }

    async fn get_appointments_by_doctor(&self, doctor_id: &str) -> Result<Vec<Appointment>, ClinicError> {
        Ok(self.appointments_where(|a| a.doctor_id == doctor_id).await)
    }

    async fn get_appointments_by_patient(&self, patient_id: &str) -> Result<Vec<Appointment>, ClinicError> {
        Ok(self.appointments_where(|a| a.patient_id == patient_id).await)
    }

    async fn update_appointment(&self, appointment: Appointment) -> Result<(), ClinicError> {
        let mut appointments = self.appointments.write().await;
        match appointments.get_mut(&appointment.id) {
            Some(existing) => {
                *existing = appointment;
                Ok(())
            }
            None => Err(ClinicError::not_found("appointment not found")),
        }
    }

    async fn delete_appointment(&self, appointment_id: &str) -> Result<bool, ClinicError> {
        let mut appointments = self.appointments.write().await;
        Ok(appointments.remove(appointment_id).is_some())
    }
}
