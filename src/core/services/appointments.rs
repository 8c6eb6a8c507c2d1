use chrono::Utc;
use serde_json::{Map, Value, json};
use tracing::{info, warn};

use super::ClinicService;
use crate::core::constants::UNKNOWN_DOCTOR;
use crate::core::errors::ClinicError;
use crate::core::models::{
    Activity, Appointment, AppointmentPatch, AppointmentStatus, BookingDetails, DoctorAppointment, HistoryEntry,
    NewAppointment, PatientAppointment, PatientHistory, Role, UserProfile,
};
use crate::core::policy;
use crate::core::validation::present;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;

impl<L: LoggingService, S: Storage> ClinicService<L, S> {
    /// Books an appointment between the caller and `counterpart_id`.
    ///
    /// A doctor books on behalf of a patient and a patient books with a
    /// doctor; the caller's role decides which side each id lands on. The
    /// new appointment always starts out `PENDING`.
    pub async fn create_appointment(
        &self,
        caller: &UserProfile,
        counterpart_id: Option<String>,
        details: BookingDetails,
    ) -> Result<Appointment, ClinicError> {
        let counterpart_id = present(counterpart_id);
        let date = present(details.date);
        let time = present(details.time);
        let reason = present(details.reason);

        let (Some(counterpart_id), Some(date), Some(time), Some(reason)) = (counterpart_id, date, time, reason)
        else {
            return Err(ClinicError::validation("invalid data"));
        };

        let (patient_id, doctor_id) = match caller.role {
            Role::Doctor => (counterpart_id, caller.id.clone()),
            Role::Patient => (caller.id.clone(), counterpart_id),
        };

        let appointment = self
            .storage
            .insert_appointment(NewAppointment {
                patient_id,
                doctor_id,
                date,
                time,
                reason,
            })
            .await?;

        info!(
            appointment_id = %appointment.id,
            booked_by = %caller.id,
            role = %caller.role,
            "appointment created"
        );
        self.record(
            Activity::AppointmentCreated,
            json!({
                "appointment_id": appointment.id,
                "patient_id": appointment.patient_id,
                "doctor_id": appointment.doctor_id,
            }),
            Some(&caller.id),
        )
        .await;

        Ok(appointment)
    }

    /// The calling doctor's appointments, each with the patient's profile.
    pub async fn list_doctor_appointments(&self, caller: &UserProfile) -> Result<Vec<DoctorAppointment>, ClinicError> {
        policy::require_role(caller, Role::Doctor)?;

        let appointments = self.storage.get_appointments_by_doctor(&caller.id).await?;
        let patients = self
            .profiles_by_id(appointments.iter().map(|a| a.patient_id.as_str()))
            .await?;

        Ok(appointments
            .into_iter()
            .map(|appointment| DoctorAppointment {
                patient: patients.get(&appointment.patient_id).cloned(),
                appointment,
            })
            .collect())
    }

    /// The calling patient's appointments, each with the doctor's profile.
    pub async fn list_patient_appointments(
        &self,
        caller: &UserProfile,
    ) -> Result<Vec<PatientAppointment>, ClinicError> {
        policy::require_role(caller, Role::Patient)?;

        let appointments = self.storage.get_appointments_by_patient(&caller.id).await?;
        let doctors = self
            .profiles_by_id(appointments.iter().map(|a| a.doctor_id.as_str()))
            .await?;

        Ok(appointments
            .into_iter()
            .map(|appointment| PatientAppointment {
                doctor: doctors.get(&appointment.doctor_id).cloned(),
                appointment,
            })
            .collect())
    }

    /// A patient's profile and full appointment history, with each doctor's name.
    pub async fn patient_history(&self, patient_id: &str) -> Result<PatientHistory, ClinicError> {
        let patient = self
            .storage
            .get_user(patient_id)
            .await?
            .filter(|user| user.role == Role::Patient)
            .ok_or_else(|| ClinicError::not_found("patient not found"))?;

        let appointments = self.storage.get_appointments_by_patient(&patient.id).await?;
        let doctors = self
            .profiles_by_id(appointments.iter().map(|a| a.doctor_id.as_str()))
            .await?;

        let appointments = appointments
            .into_iter()
            .map(|appointment| HistoryEntry {
                doctor_name: doctors
                    .get(&appointment.doctor_id)
                    .map(|doctor| doctor.name.clone())
                    .unwrap_or_else(|| UNKNOWN_DOCTOR.to_string()),
                appointment,
            })
            .collect();

        Ok(PatientHistory {
            patient: UserProfile::from(patient),
            appointments,
        })
    }

    /// Applies a partial update limited to the caller role's allow-list.
    ///
    /// Any field outside the allow-list rejects the whole update. Values are
    /// stored as given: dates and times are not parsed, and status changes
    /// are not checked against the appointment state machine.
    pub async fn update_appointment(
        &self,
        caller: &UserProfile,
        appointment_id: &str,
        fields: Map<String, Value>,
    ) -> Result<Appointment, ClinicError> {
        let mut appointment = self.find_appointment(appointment_id).await?;

        policy::authorize_update(caller, &appointment).inspect_err(|_| {
            warn!(appointment_id, caller = %caller.id, "update rejected, caller not a participant");
        })?;
        policy::check_update_fields(caller.role, &fields)?;
        let patch = AppointmentPatch::from_fields(fields)?;

        if appointment.status.is_terminal() {
            warn!(appointment_id, status = %appointment.status, "updating an appointment in a terminal state");
        }
        if let Some(next) = patch.status.filter(|next| !appointment.status.can_transition_to(*next)) {
            warn!(appointment_id, from = %appointment.status, to = %next, "status change outside the usual lifecycle");
        }

        patch.apply(&mut appointment, Utc::now());
        self.storage.update_appointment(appointment.clone()).await?;

        info!(appointment_id, updated_by = %caller.id, "appointment updated");
        self.record(
            Activity::AppointmentUpdated,
            json!({ "appointment_id": appointment.id, "status": appointment.status }),
            Some(&caller.id),
        )
        .await;

        Ok(appointment)
    }

    /// Marks the appointment cancelled. Either participant may cancel, and
    /// cancelling twice simply refreshes the cancellation time.
    pub async fn cancel_appointment(
        &self,
        caller: &UserProfile,
        appointment_id: &str,
    ) -> Result<Appointment, ClinicError> {
        let mut appointment = self.find_appointment(appointment_id).await?;

        policy::authorize_cancel(caller, &appointment).inspect_err(|_| {
            warn!(appointment_id, caller = %caller.id, "cancel rejected, caller not a participant");
        })?;

        if appointment.status.is_terminal() {
            warn!(appointment_id, status = %appointment.status, "cancelling an appointment in a terminal state");
        }

        let now = Utc::now();
        appointment.status = AppointmentStatus::Cancelled;
        appointment.cancelled_at = Some(now);
        appointment.updated_at = now;
        self.storage.update_appointment(appointment.clone()).await?;

        info!(appointment_id, cancelled_by = %caller.id, "appointment cancelled");
        self.record(
            Activity::AppointmentCancelled,
            json!({ "appointment_id": appointment.id }),
            Some(&caller.id),
        )
        .await;

        Ok(appointment)
    }

    /// Removes the appointment document.
    ///
    /// Any authenticated caller may delete any appointment by id; removals by
    /// someone who is not a participant are logged.
    pub async fn delete_appointment(&self, caller: &UserProfile, appointment_id: &str) -> Result<(), ClinicError> {
        let appointment = self.find_appointment(appointment_id).await?;

        if !appointment.involves(&caller.id) {
            warn!(appointment_id, caller = %caller.id, "appointment deleted by a non-participant");
        }

        if !self.storage.delete_appointment(appointment_id).await? {
            return Err(ClinicError::not_found("Appointment not found"));
        }

        info!(appointment_id, deleted_by = %caller.id, "appointment deleted");
        self.record(
            Activity::AppointmentDeleted,
            json!({
                "appointment_id": appointment.id,
                "patient_id": appointment.patient_id,
                "doctor_id": appointment.doctor_id,
            }),
            Some(&caller.id),
        )
        .await;

        Ok(())
    }

    async fn find_appointment(&self, appointment_id: &str) -> Result<Appointment, ClinicError> {
        self.storage
            .get_appointment(appointment_id)
            .await?
            .ok_or_else(|| ClinicError::not_found("appointment not found"))
    }
}
