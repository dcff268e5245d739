//! ADUser repository port.

use async_trait::async_trait;

use crate::domain::foundation::{AdUserId, DomainError};
use crate::domain::identity::AdUser;

/// Repository port for mirrored directory accounts.
///
/// The distinguished name is the natural key; implementations must reject
/// a save that would give two records the same distinguished name.
#[async_trait]
pub trait AdUserRepository: Send + Sync {
    /// Create or overwrite a mirrored account.
    async fn save(&self, user: &AdUser) -> Result<(), DomainError>;

    /// Find by internal id.
    async fn find_by_id(&self, id: &AdUserId) -> Result<Option<AdUser>, DomainError>;

    /// Find by the directory's natural key.
    async fn find_by_distinguished_name(&self, dn: &str) -> Result<Option<AdUser>, DomainError>;

    /// Case-insensitive substring search across logon name and
    /// distinguished name.
    async fn search(&self, term: &str) -> Result<Vec<AdUser>, DomainError>;

    /// All mirrored accounts.
    async fn list_all(&self) -> Result<Vec<AdUser>, DomainError>;

    /// Total number of mirrored accounts (dashboard metric).
    async fn count(&self) -> Result<u64, DomainError>;

    /// Accounts whose password never expires (dashboard metric).
    async fn count_password_never_expires(&self) -> Result<u64, DomainError>;
}
