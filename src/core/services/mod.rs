//! Application services.
//!
//! [`ClinicService`] owns the stores and the token service. Its operations
//! are split by concern: account registration and login in `accounts`, the
//! appointment lifecycle in `appointments`, and profile lookups in
//! `directory`. Callers pass the verified identity explicitly; nothing here
//! reads ambient session state.

mod accounts;
mod appointments;
mod directory;

use tracing::warn;

use crate::auth::jwt::JwtService;
use crate::core::errors::ClinicError;
use crate::core::models::{Activity, UserProfile};
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;

pub struct ClinicService<L: LoggingService, S: Storage> {
    storage: S,
    logging: L,
    jwt_service: JwtService,
    bcrypt_cost: u32,
}

impl<L: LoggingService, S: Storage> ClinicService<L, S> {
    pub fn new(storage: S, logging: L, jwt_service: JwtService, bcrypt_cost: u32) -> Self {
        ClinicService {
            storage,
            logging,
            jwt_service,
            bcrypt_cost,
        }
    }

    /// Resolves a session token to the identity it carries.
    pub fn validate_token(&self, token: &str) -> Result<UserProfile, ClinicError> {
        Ok(self.jwt_service.verify(token)?)
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        self.jwt_service.ttl()
    }

    pub fn logging(&self) -> &L {
        &self.logging
    }

    /// Activity log writes never fail the operation that triggered them.
    async fn record(&self, action: Activity, details: serde_json::Value, user_id: Option<&str>) {
        if let Err(e) = self.logging.log_action(action, details, user_id).await {
            warn!(%action, error = %e, "failed to write activity log");
        }
    }
}
