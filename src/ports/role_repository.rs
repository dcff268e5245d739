//! Role repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, RoleId};
use crate::domain::role::{Role, RoleResource};

/// Repository port for Roles.
///
/// Role names are de-duplicated only at group-import time, so name lookup
/// returns every match rather than assuming uniqueness.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Create or overwrite a Role.
    async fn save(&self, role: &Role) -> Result<(), DomainError>;

    /// Find by id.
    async fn find_by_id(&self, id: &RoleId) -> Result<Option<Role>, DomainError>;

    /// Every Role whose name equals `name` (case-insensitive).
    async fn find_by_name(&self, name: &str) -> Result<Vec<Role>, DomainError>;

    /// Every Role of the given classification.
    async fn list_by_resource(&self, resource: RoleResource) -> Result<Vec<Role>, DomainError>;

    /// Case-insensitive substring search across name and description.
    async fn search(&self, term: &str) -> Result<Vec<Role>, DomainError>;

    /// All Roles.
    async fn list_all(&self) -> Result<Vec<Role>, DomainError>;

    /// Total number of Roles (dashboard metric).
    async fn count(&self) -> Result<u64, DomainError>;
}
