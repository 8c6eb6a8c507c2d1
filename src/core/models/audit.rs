use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Account and appointment mutations recorded in the activity log.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Activity {
    UserRegistered,
    UserLoggedIn,
    AppointmentCreated,
    AppointmentUpdated,
    AppointmentCancelled,
    AppointmentDeleted,
}

impl Activity {
    pub fn as_str(self) -> &'static str {
        match self {
            Activity::UserRegistered => "USER_REGISTERED",
            Activity::UserLoggedIn => "USER_LOGGED_IN",
            Activity::AppointmentCreated => "APPOINTMENT_CREATED",
            Activity::AppointmentUpdated => "APPOINTMENT_UPDATED",
            Activity::AppointmentCancelled => "APPOINTMENT_CANCELLED",
            Activity::AppointmentDeleted => "APPOINTMENT_DELETED",
        }
    }

    /// Appointment entries carry an `appointment_id` in their details.
    pub fn concerns_appointment(self) -> bool {
        !matches!(self, Activity::UserRegistered | Activity::UserLoggedIn)
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppLog {
    pub id: String,
    pub action: Activity,
    pub user_id: Option<String>,
    #[schema(value_type = Object)]
    pub details: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}
