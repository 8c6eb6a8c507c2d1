use std::collections::{BTreeSet, HashMap};

use futures::future::try_join_all;

use super::ClinicService;
use crate::core::errors::ClinicError;
use crate::core::models::{Role, UserProfile};
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;

impl<L: LoggingService, S: Storage> ClinicService<L, S> {
    /// Every user with the given role. Unpaginated.
    pub async fn list_users_by_role(&self, role: Role) -> Result<Vec<UserProfile>, ClinicError> {
        let users = self.storage.get_users_by_role(role).await?;
        Ok(users.into_iter().map(UserProfile::from).collect())
    }

    /// Point-lookups for each distinct id, run concurrently. Ids with no user
    /// are simply absent from the map. Nothing is cached between calls.
    pub async fn profiles_by_id<'a, I>(&self, ids: I) -> Result<HashMap<String, UserProfile>, ClinicError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let distinct: BTreeSet<&str> = ids.into_iter().collect();
        let lookups = distinct.into_iter().map(|id| self.storage.get_user(id));
        let found = try_join_all(lookups).await?;

        Ok(found
            .into_iter()
            .flatten()
            .map(|user| (user.id.clone(), UserProfile::from(user)))
            .collect())
    }
}
