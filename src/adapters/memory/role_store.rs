//! In-memory Role store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, RoleId};
use crate::domain::role::{Role, RoleResource};
use crate::ports::RoleRepository;

use super::{contains_ignore_case, lock_poisoned};

/// In-memory Role store.
///
/// Role names are deliberately not unique here; duplicate Organizational
/// names are a data-quality defect the assignment planner detects.
#[derive(Default)]
pub struct InMemoryRoleStore {
    records: RwLock<HashMap<RoleId, Role>>,
}

impl InMemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleStore {
    async fn save(&self, role: &Role) -> Result<(), DomainError> {
        let mut records = self.records.write().map_err(|_| lock_poisoned("role"))?;
        records.insert(role.id, role.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &RoleId) -> Result<Option<Role>, DomainError> {
        let records = self.records.read().map_err(|_| lock_poisoned("role"))?;
        Ok(records.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Role>, DomainError> {
        let records = self.records.read().map_err(|_| lock_poisoned("role"))?;
        Ok(records
            .values()
            .filter(|r| r.matches_name(name))
            .cloned()
            .collect())
    }

    async fn list_by_resource(&self, resource: RoleResource) -> Result<Vec<Role>, DomainError> {
        let records = self.records.read().map_err(|_| lock_poisoned("role"))?;
        Ok(records
            .values()
            .filter(|r| r.resource == resource)
            .cloned()
            .collect())
    }

    async fn search(&self, term: &str) -> Result<Vec<Role>, DomainError> {
        let records = self.records.read().map_err(|_| lock_poisoned("role"))?;
        Ok(records
            .values()
            .filter(|r| {
                contains_ignore_case(&r.name, term) || contains_ignore_case(&r.description, term)
            })
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Role>, DomainError> {
        let records = self.records.read().map_err(|_| lock_poisoned("role"))?;
        Ok(records.values().cloned().collect())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let records = self.records.read().map_err(|_| lock_poisoned("role"))?;
        Ok(records.len() as u64)
    }
}
