//! Synchronization policy configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Synchronization policy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// Substrings that mark a directory group as administrative.
    ///
    /// A group whose common name contains any of these markers
    /// (case-insensitive) is imported with the admin flag set.
    #[serde(default = "default_admin_group_markers")]
    pub admin_group_markers: Vec<String>,
}

impl SyncConfig {
    /// Validate sync configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.admin_group_markers.iter().any(|m| m.trim().is_empty()) {
            return Err(ValidationError::EmptyAdminGroupMarker);
        }
        Ok(())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            admin_group_markers: default_admin_group_markers(),
        }
    }
}

fn default_admin_group_markers() -> Vec<String> {
    vec!["admin".to_string()]
}
