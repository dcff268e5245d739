//! DeletePersonsHandler - explicit Person deletion with edge detachment.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DomainError, PersonId, ServiceResult};
use crate::ports::{AdUserRepository, PersonRepository, RoleRepository};

/// Deletes Persons and detaches every Role and ADUser association, so no
/// dangling edges survive the deletion.
pub struct DeletePersonsHandler {
    persons: Arc<dyn PersonRepository>,
    roles: Arc<dyn RoleRepository>,
    ad_users: Arc<dyn AdUserRepository>,
}

impl DeletePersonsHandler {
    pub fn new(
        persons: Arc<dyn PersonRepository>,
        roles: Arc<dyn RoleRepository>,
        ad_users: Arc<dyn AdUserRepository>,
    ) -> Self {
        Self {
            persons,
            roles,
            ad_users,
        }
    }

    /// Delete the given Persons. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// `StoreWrite` on a persistence failure (fail-fast).
    pub async fn handle(&self, ids: &[PersonId]) -> Result<ServiceResult, DomainError> {
        let mut deleted = 0u32;
        for id in ids {
            let Some(person) = self.persons.find_by_id(id).await? else {
                continue;
            };

            for role_id in &person.role_ids {
                if let Some(mut role) = self.roles.find_by_id(role_id).await? {
                    if role.remove_person(&person.id) {
                        self.roles.save(&role).await?;
                    }
                }
            }

            for ad_user_id in &person.ad_user_ids {
                if let Some(mut user) = self.ad_users.find_by_id(ad_user_id).await? {
                    if user.person_id == Some(person.id) {
                        user.unlink_person();
                        self.ad_users.save(&user).await?;
                    }
                }
            }

            self.persons.delete(&person.id).await?;
            deleted += 1;
            info!(person = %person.id, "deleted person and detached associations");
        }

        Ok(ServiceResult::ok(format!("{deleted} persons deleted.")))
    }
}
