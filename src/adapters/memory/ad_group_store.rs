//! In-memory ADGroup store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AdGroupId, DomainError};
use crate::domain::identity::AdGroup;
use crate::ports::AdGroupRepository;

use super::{contains_ignore_case, lock_poisoned};

/// In-memory ADGroup store, same natural-key discipline as the account
/// store.
#[derive(Default)]
pub struct InMemoryAdGroupStore {
    records: RwLock<HashMap<AdGroupId, AdGroup>>,
}

impl InMemoryAdGroupStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdGroupRepository for InMemoryAdGroupStore {
    async fn save(&self, group: &AdGroup) -> Result<(), DomainError> {
        let mut records = self.records.write().map_err(|_| lock_poisoned("ad_group"))?;
        let clash = records.values().any(|other| {
            other.id != group.id && other.distinguished_name == group.distinguished_name
        });
        if clash {
            return Err(DomainError::validation(
                "distinguished_name",
                format!(
                    "distinguished name '{}' already belongs to another record",
                    group.distinguished_name
                ),
            ));
        }
        records.insert(group.id, group.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &AdGroupId) -> Result<Option<AdGroup>, DomainError> {
        let records = self.records.read().map_err(|_| lock_poisoned("ad_group"))?;
        Ok(records.get(id).cloned())
    }

    async fn find_by_distinguished_name(&self, dn: &str) -> Result<Option<AdGroup>, DomainError> {
        let records = self.records.read().map_err(|_| lock_poisoned("ad_group"))?;
        Ok(records
            .values()
            .find(|g| g.distinguished_name == dn)
            .cloned())
    }

    async fn search(&self, term: &str) -> Result<Vec<AdGroup>, DomainError> {
        let records = self.records.read().map_err(|_| lock_poisoned("ad_group"))?;
        Ok(records
            .values()
            .filter(|g| {
                contains_ignore_case(&g.common_name, term)
                    || contains_ignore_case(&g.distinguished_name, term)
            })
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<AdGroup>, DomainError> {
        let records = self.records.read().map_err(|_| lock_poisoned("ad_group"))?;
        Ok(records.values().cloned().collect())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let records = self.records.read().map_err(|_| lock_poisoned("ad_group"))?;
        Ok(records.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::directory::GroupRecord;

    fn group(dn: &str, cn: &str) -> AdGroup {
        AdGroup::from_record(
            &GroupRecord {
                distinguished_name: dn.to_string(),
                common_name: cn.to_string(),
                description: String::new(),
                member_distinguished_names: vec![],
            },
            &[],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn distinguished_name_is_a_natural_key() {
        let store = InMemoryAdGroupStore::new();
        store
            .save(&group("CN=Sales,DC=example", "Sales"))
            .await
            .unwrap();
        assert!(store
            .save(&group("CN=Sales,DC=example", "Sales copy"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn count_reflects_saved_groups() {
        let store = InMemoryAdGroupStore::new();
        assert_eq!(store.count().await.unwrap(), 0);
        store
            .save(&group("CN=Sales,DC=example", "Sales"))
            .await
            .unwrap();
        store
            .save(&group("CN=Finance,DC=example", "Finance"))
            .await
            .unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn search_spans_name_and_dn() {
        let store = InMemoryAdGroupStore::new();
        store
            .save(&group("CN=Sales,OU=Groups,DC=example", "Sales"))
            .await
            .unwrap();
        assert_eq!(store.search("sales").await.unwrap().len(), 1);
        assert_eq!(store.search("ou=groups").await.unwrap().len(), 1);
    }
}
