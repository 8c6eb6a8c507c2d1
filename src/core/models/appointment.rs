use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::UserProfile;
use crate::core::errors::ClinicError;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    /// Rejected, cancelled and completed appointments have no outgoing transitions.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AppointmentStatus::Rejected | AppointmentStatus::Cancelled | AppointmentStatus::Completed
        )
    }

    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        match (self, next) {
            (Pending, Confirmed | Rejected | Cancelled) => true,
            (Confirmed, Cancelled | Completed) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AppointmentStatus::Pending => "PENDING",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::Rejected => "REJECTED",
            AppointmentStatus::Cancelled => "CANCELLED",
            AppointmentStatus::Completed => "COMPLETED",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    /// Day-month-year, e.g. `20-06-2025`. Stored as supplied.
    pub date: String,
    /// 12-hour clock with meridiem, e.g. `3 PM`. Stored as supplied.
    pub time: String,
    pub reason: String,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Appointment {
    pub fn involves(&self, user_id: &str) -> bool {
        self.patient_id == user_id || self.doctor_id == user_id
    }
}

#[derive(Clone, Debug)]
pub struct NewAppointment {
    pub patient_id: String,
    pub doctor_id: String,
    pub date: String,
    pub time: String,
    pub reason: String,
}

/// Fields supplied by a booking request, before the counterpart is resolved.
#[derive(Clone, Debug, Default)]
pub struct BookingDetails {
    pub date: Option<String>,
    pub time: Option<String>,
    pub reason: Option<String>,
}

/// A partial update that has already passed the caller's allow-list.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AppointmentPatch {
    pub status: Option<AppointmentStatus>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub reason: Option<String>,
    pub notes: Option<String>,
}

impl AppointmentPatch {
    pub fn from_fields(fields: serde_json::Map<String, serde_json::Value>) -> Result<Self, ClinicError> {
        serde_json::from_value(serde_json::Value::Object(fields))
            .map_err(|e| ClinicError::validation(format!("Invalid update: {}", e)))
    }

    pub fn apply(self, appointment: &mut Appointment, now: DateTime<Utc>) {
        if let Some(status) = self.status {
            appointment.status = status;
        }
        if let Some(date) = self.date {
            appointment.date = date;
        }
        if let Some(time) = self.time {
            appointment.time = time;
        }
        if let Some(reason) = self.reason {
            appointment.reason = reason;
        }
        if let Some(notes) = self.notes {
            appointment.notes = Some(notes);
        }
        appointment.updated_at = now;
    }
}

/// Doctor's view: the appointment plus the patient's profile, `null` when the patient is gone.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct DoctorAppointment {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub patient: Option<UserProfile>,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct PatientAppointment {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub doctor: Option<UserProfile>,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub doctor_name: String,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct PatientHistory {
    pub patient: UserProfile,
    pub appointments: Vec<HistoryEntry>,
}
