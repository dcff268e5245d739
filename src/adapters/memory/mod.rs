//! In-memory store adapters.
//!
//! Key-indexed maps behind `RwLock`s, with the substring-search and
//! natural-key semantics the engine needs. Each save is atomic per record;
//! there is no cross-record transaction, matching the engine's
//! idempotent-per-record write discipline.

mod ad_group_store;
mod ad_user_store;
mod person_store;
mod role_store;

pub use ad_group_store::InMemoryAdGroupStore;
pub use ad_user_store::InMemoryAdUserStore;
pub use person_store::InMemoryPersonStore;
pub use role_store::InMemoryRoleStore;

use crate::domain::foundation::DomainError;

/// Convert a poisoned-lock failure into a store-write error.
pub(crate) fn lock_poisoned(store: &str) -> DomainError {
    DomainError::store_write(format!("{store} store lock poisoned"))
}

/// Case-insensitive substring containment.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
