pub mod in_memory;

use crate::core::errors::ClinicError;
use crate::core::models::audit::{Activity, AppLog};
use async_trait::async_trait;

/// Activity log of account and appointment mutations.
#[async_trait]
pub trait LoggingService: Send + Sync {
    async fn log_action(
        &self,
        action: Activity,
        details: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<(), ClinicError>;

    /// Entries in the order they were recorded.
    async fn get_logs(&self) -> Result<Vec<AppLog>, ClinicError>;

    /// Entries about one appointment, matched on `details.appointment_id`.
    async fn get_appointment_trail(&self, appointment_id: &str) -> Result<Vec<AppLog>, ClinicError>;
}
