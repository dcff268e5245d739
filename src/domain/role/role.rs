//! Role entity - an internal authorization grouping.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AdGroupId, AdUserId, DomainError, PersonId, RoleId};
use crate::domain::identity::AdGroup;

use super::RoleResource;

/// An internal authorization grouping.
///
/// A Role imported from a directory group copies the group's administrative
/// derivation once at import time; the flag is human-overridable afterwards
/// and never re-derived by later syncs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub description: String,
    pub is_admin_role: bool,
    pub resource: RoleResource,
    pub person_ids: HashSet<PersonId>,
    pub ad_group_ids: HashSet<AdGroupId>,
    pub ad_user_ids: HashSet<AdUserId>,
}

impl Role {
    /// Create a new Role with the default `Standard` classification.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name", "role name must not be empty"));
        }
        Ok(Self {
            id: RoleId::new(),
            name,
            description: String::new(),
            is_admin_role: false,
            resource: RoleResource::Standard,
            person_ids: HashSet::new(),
            ad_group_ids: HashSet::new(),
            ad_user_ids: HashSet::new(),
        })
    }

    /// Import a Role from a mirrored directory group.
    ///
    /// Name and description come from the group; the admin flag copies the
    /// group's derivation at import time; the classification defaults to
    /// `Standard`.
    pub fn from_group(group: &AdGroup) -> Result<Self, DomainError> {
        let mut role = Self::new(&group.common_name)?;
        role.description = group.description.clone();
        role.is_admin_role = group.is_admin_group;
        role.ad_group_ids.insert(group.id);
        Ok(role)
    }

    /// Builder-style resource classification.
    pub fn with_resource(mut self, resource: RoleResource) -> Self {
        self.resource = resource;
        self
    }

    /// Whether the role name equals `name`, case-insensitively.
    ///
    /// Unicode case folding, same rule as the department matching on
    /// [`crate::domain::identity::Person`].
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Whether this role already backs a directory group.
    pub fn is_group_linked(&self) -> bool {
        !self.ad_group_ids.is_empty()
    }

    /// Assign a Person. Returns true when the edge is new.
    pub fn assign_person(&mut self, id: PersonId) -> bool {
        self.person_ids.insert(id)
    }

    /// Remove a Person edge.
    pub fn remove_person(&mut self, id: &PersonId) -> bool {
        self.person_ids.remove(id)
    }

    /// Link a mirrored group. Returns true when the edge is new.
    pub fn link_group(&mut self, id: AdGroupId) -> bool {
        self.ad_group_ids.insert(id)
    }

    /// Link a mirrored account. Returns true when the edge is new.
    pub fn link_ad_user(&mut self, id: AdUserId) -> bool {
        self.ad_user_ids.insert(id)
    }
}
