use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::core::errors::ClinicError;
use crate::core::models::audit::{Activity, AppLog};
use crate::infrastructure::logging::LoggingService;

/// Append-only activity log held in process memory.
#[derive(Clone, Default)]
pub struct InMemoryLogging {
    entries: Arc<RwLock<Vec<AppLog>>>,
}

impl InMemoryLogging {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LoggingService for InMemoryLogging {
    async fn log_action(
        &self,
        action: Activity,
        details: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<(), ClinicError> {
        let entry = AppLog {
            id: Uuid::new_v4().to_string(),
            action,
            user_id: user_id.map(str::to_owned),
            details,
            timestamp: Utc::now(),
        };
        debug!(log_id = %entry.id, %action, "activity recorded");
        self.entries.write().await.push(entry);
        Ok(())
    }

    async fn get_logs(&self) -> Result<Vec<AppLog>, ClinicError> {
        Ok(self.entries.read().await.clone())
    }

    async fn get_appointment_trail(&self, appointment_id: &str) -> Result<Vec<AppLog>, ClinicError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|entry| entry.action.concerns_appointment())
            .filter(|entry| entry.details.get("appointment_id").and_then(|id| id.as_str()) == Some(appointment_id))
            .cloned()
            .collect())
    }
}
