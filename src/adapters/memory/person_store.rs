//! In-memory Person store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PersonId};
use crate::domain::identity::Person;
use crate::ports::PersonRepository;

use super::{contains_ignore_case, lock_poisoned};

/// In-memory Person store.
///
/// Enforces the central-account-name uniqueness invariant on save.
#[derive(Default)]
pub struct InMemoryPersonStore {
    records: RwLock<HashMap<PersonId, Person>>,
}

impl InMemoryPersonStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersonRepository for InMemoryPersonStore {
    async fn save(&self, person: &Person) -> Result<(), DomainError> {
        let mut records = self.records.write().map_err(|_| lock_poisoned("person"))?;
        if let Some(account_name) = person.central_account_name.as_deref() {
            let taken = records.values().any(|other| {
                other.id != person.id && other.matches_central_account(account_name)
            });
            if taken {
                return Err(DomainError::validation(
                    "central_account_name",
                    format!("central account name '{account_name}' is already in use"),
                ));
            }
        }
        records.insert(person.id, person.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PersonId) -> Result<Option<Person>, DomainError> {
        let records = self.records.read().map_err(|_| lock_poisoned("person"))?;
        Ok(records.get(id).cloned())
    }

    async fn find_by_central_account_name(
        &self,
        name: &str,
    ) -> Result<Option<Person>, DomainError> {
        let records = self.records.read().map_err(|_| lock_poisoned("person"))?;
        Ok(records
            .values()
            .find(|p| p.matches_central_account(name))
            .cloned())
    }

    async fn find_by_department_name(&self, name: &str) -> Result<Vec<Person>, DomainError> {
        let records = self.records.read().map_err(|_| lock_poisoned("person"))?;
        Ok(records
            .values()
            .filter(|p| p.matches_department(name))
            .cloned()
            .collect())
    }

    async fn search(&self, term: &str) -> Result<Vec<Person>, DomainError> {
        let records = self.records.read().map_err(|_| lock_poisoned("person"))?;
        Ok(records
            .values()
            .filter(|p| {
                contains_ignore_case(&p.surname, term)
                    || contains_ignore_case(&p.given_name, term)
                    || p.central_account_name
                        .as_deref()
                        .is_some_and(|n| contains_ignore_case(n, term))
                    || p.department_name
                        .as_deref()
                        .is_some_and(|n| contains_ignore_case(n, term))
            })
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Person>, DomainError> {
        let records = self.records.read().map_err(|_| lock_poisoned("person"))?;
        Ok(records.values().cloned().collect())
    }

    async fn delete(&self, id: &PersonId) -> Result<(), DomainError> {
        let mut records = self.records.write().map_err(|_| lock_poisoned("person"))?;
        records.remove(id);
        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let records = self.records.read().map_err(|_| lock_poisoned("person"))?;
        Ok(records.len() as u64)
    }
}
