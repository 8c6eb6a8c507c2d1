use serde_json::json;
use tracing::{info, warn};

use super::ClinicService;
use crate::auth::password::{hash_password, verify_password};
use crate::core::errors::ClinicError;
use crate::core::models::{Activity, NewUser, Registration, Role, UserProfile};
use crate::core::validation::{present, validate_email};
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;

impl<L: LoggingService, S: Storage> ClinicService<L, S> {
    /// Creates an account after checking the email is not already taken.
    ///
    /// The check and the insert are separate store calls, so two concurrent
    /// registrations with the same email can both succeed.
    pub async fn register(&self, registration: Registration) -> Result<UserProfile, ClinicError> {
        let name = present(registration.name);
        let email = present(registration.email);
        let password = registration.password.filter(|p| !p.is_empty());
        let role = present(registration.role);

        let (Some(name), Some(email), Some(password), Some(role)) = (name, email, password, role) else {
            return Err(ClinicError::validation("Few fields are empty"));
        };

        let role: Role = role.parse()?;
        validate_email(&email)?;

        if self.storage.get_user_by_email(&email).await?.is_some() {
            warn!(email = %email, "registration rejected, email already taken");
            return Err(ClinicError::EmailTaken);
        }

        let specialization = match role {
            Role::Doctor => present(registration.specialization),
            Role::Patient => None,
        };
        let password_hash = hash_password(password, self.bcrypt_cost).await?;

        let user = self
            .storage
            .insert_user(NewUser {
                name,
                email,
                password_hash,
                role,
                specialization,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "user registered");
        self.record(
            Activity::UserRegistered,
            json!({ "user_id": user.id, "role": user.role, "email": user.email }),
            Some(&user.id),
        )
        .await;

        Ok(UserProfile::from(user))
    }

    /// Checks credentials and issues a session token for the account.
    pub async fn login(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<(UserProfile, String), ClinicError> {
        let email = present(email);
        let password = password.filter(|p| !p.is_empty());
        let (Some(email), Some(password)) = (email, password) else {
            return Err(ClinicError::validation("Insufficient data to process"));
        };

        let Some(user) = self.storage.get_user_by_email(&email).await? else {
            warn!(email = %email, "login for unregistered email");
            return Err(ClinicError::InvalidCredentials);
        };

        if !verify_password(password, user.password_hash.clone()).await? {
            warn!(user_id = %user.id, "login with incorrect password");
            return Err(ClinicError::InvalidCredentials);
        }

        let profile = UserProfile::from(user);
        let token = self.jwt_service.issue(&profile)?;

        info!(user_id = %profile.id, "user logged in");
        self.record(Activity::UserLoggedIn, json!({ "user_id": profile.id }), Some(&profile.id))
            .await;

        Ok((profile, token))
    }
}
