//! DirectoryClient port - the abstract read-only view of the directory.
//!
//! The LDAP-style bind, TLS negotiation and paging protocol live behind
//! this port; the engine only consumes the record streams it yields.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::domain::directory::{AccountRecord, GroupRecord};
use crate::domain::foundation::DomainError;

/// A lazy, finite, non-restartable enumeration of snapshot records.
///
/// Items may fail individually when connectivity drops mid-enumeration;
/// a fresh synchronization run must request a new snapshot.
pub type RecordStream<'a, T> = BoxStream<'a, Result<T, DomainError>>;

/// Port for pulling point-in-time snapshots from the external directory.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Verify the configured endpoint is reachable and credentials are
    /// accepted.
    ///
    /// # Errors
    ///
    /// `Connectivity` when the endpoint is unreachable or the bind is
    /// rejected. The message must not echo credentials.
    async fn test_connection(&self) -> Result<(), DomainError>;

    /// Enumerate the snapshot's account records.
    ///
    /// # Errors
    ///
    /// `Connectivity` when the snapshot cannot be opened.
    async fn list_accounts(&self) -> Result<RecordStream<'_, AccountRecord>, DomainError>;

    /// Enumerate the snapshot's group records.
    ///
    /// # Errors
    ///
    /// `Connectivity` when the snapshot cannot be opened.
    async fn list_groups(&self) -> Result<RecordStream<'_, GroupRecord>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that the trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn DirectoryClient) {}
}
