//! In-memory ADUser store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AdUserId, DomainError};
use crate::domain::identity::AdUser;
use crate::ports::AdUserRepository;

use super::{contains_ignore_case, lock_poisoned};

/// In-memory ADUser store keyed by internal id, with the distinguished
/// name enforced as a secondary natural key.
#[derive(Default)]
pub struct InMemoryAdUserStore {
    records: RwLock<HashMap<AdUserId, AdUser>>,
}

impl InMemoryAdUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdUserRepository for InMemoryAdUserStore {
    async fn save(&self, user: &AdUser) -> Result<(), DomainError> {
        let mut records = self.records.write().map_err(|_| lock_poisoned("ad_user"))?;
        let clash = records.values().any(|other| {
            other.id != user.id && other.distinguished_name == user.distinguished_name
        });
        if clash {
            return Err(DomainError::validation(
                "distinguished_name",
                format!(
                    "distinguished name '{}' already belongs to another record",
                    user.distinguished_name
                ),
            ));
        }
        records.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &AdUserId) -> Result<Option<AdUser>, DomainError> {
        let records = self.records.read().map_err(|_| lock_poisoned("ad_user"))?;
        Ok(records.get(id).cloned())
    }

    async fn find_by_distinguished_name(&self, dn: &str) -> Result<Option<AdUser>, DomainError> {
        let records = self.records.read().map_err(|_| lock_poisoned("ad_user"))?;
        Ok(records
            .values()
            .find(|u| u.distinguished_name == dn)
            .cloned())
    }

    async fn search(&self, term: &str) -> Result<Vec<AdUser>, DomainError> {
        let records = self.records.read().map_err(|_| lock_poisoned("ad_user"))?;
        Ok(records
            .values()
            .filter(|u| {
                contains_ignore_case(&u.logon_name, term)
                    || contains_ignore_case(&u.distinguished_name, term)
            })
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<AdUser>, DomainError> {
        let records = self.records.read().map_err(|_| lock_poisoned("ad_user"))?;
        Ok(records.values().cloned().collect())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let records = self.records.read().map_err(|_| lock_poisoned("ad_user"))?;
        Ok(records.len() as u64)
    }

    async fn count_password_never_expires(&self) -> Result<u64, DomainError> {
        let records = self.records.read().map_err(|_| lock_poisoned("ad_user"))?;
        Ok(records.values().filter(|u| !u.password_expires).count() as u64)
    }
}
