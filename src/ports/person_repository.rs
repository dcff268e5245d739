//! Person repository port.
//!
//! The store is treated as a simple key-indexed collection supporting
//! natural-key lookup and substring search; persistence internals are the
//! adapter's concern.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PersonId};
use crate::domain::identity::Person;

/// Repository port for Person records.
///
/// Implementations must enforce the central-account-name uniqueness
/// invariant on save and report persistence failures as `StoreWrite`
/// errors.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Create or overwrite a Person.
    async fn save(&self, person: &Person) -> Result<(), DomainError>;

    /// Find a Person by id.
    async fn find_by_id(&self, id: &PersonId) -> Result<Option<Person>, DomainError>;

    /// Find the Person carrying this central account name (case-insensitive).
    ///
    /// At most one Person can match, by invariant.
    async fn find_by_central_account_name(&self, name: &str)
        -> Result<Option<Person>, DomainError>;

    /// Every Person whose department name equals `name` (case-insensitive).
    async fn find_by_department_name(&self, name: &str) -> Result<Vec<Person>, DomainError>;

    /// Case-insensitive substring search across surname, given name,
    /// central account name and department name.
    async fn search(&self, term: &str) -> Result<Vec<Person>, DomainError>;

    /// All Persons.
    async fn list_all(&self) -> Result<Vec<Person>, DomainError>;

    /// Delete a Person record. Edge detachment is the caller's duty.
    async fn delete(&self, id: &PersonId) -> Result<(), DomainError>;

    /// Number of stored Persons.
    async fn count(&self) -> Result<u64, DomainError>;
}
