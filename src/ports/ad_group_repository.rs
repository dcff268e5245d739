//! ADGroup repository port.

use async_trait::async_trait;

use crate::domain::foundation::{AdGroupId, DomainError};
use crate::domain::identity::AdGroup;

/// Repository port for mirrored directory groups.
///
/// Same natural-key discipline as the account repository: the
/// distinguished name is unique across records.
#[async_trait]
pub trait AdGroupRepository: Send + Sync {
    /// Create or overwrite a mirrored group.
    async fn save(&self, group: &AdGroup) -> Result<(), DomainError>;

    /// Find by internal id.
    async fn find_by_id(&self, id: &AdGroupId) -> Result<Option<AdGroup>, DomainError>;

    /// Find by the directory's natural key.
    async fn find_by_distinguished_name(&self, dn: &str) -> Result<Option<AdGroup>, DomainError>;

    /// Case-insensitive substring search across common name and
    /// distinguished name.
    async fn search(&self, term: &str) -> Result<Vec<AdGroup>, DomainError>;

    /// All mirrored groups.
    async fn list_all(&self) -> Result<Vec<AdGroup>, DomainError>;

    /// Total number of mirrored groups (dashboard metric).
    async fn count(&self) -> Result<u64, DomainError>;
}
