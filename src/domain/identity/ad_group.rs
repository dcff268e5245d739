//! ADGroup entity - a mirrored directory group.

use serde::{Deserialize, Serialize};

use crate::domain::directory::GroupRecord;
use crate::domain::foundation::{AdGroupId, DomainError, RoleId};

/// A mirrored directory group.
///
/// Follows the same natural-key and staleness rules as [`super::AdUser`].
/// The administrative flag is derived from the configured marker substrings
/// and re-derived on every snapshot update; the Role imported from a group
/// copies it once and is never re-derived afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdGroup {
    pub id: AdGroupId,
    pub common_name: String,
    pub distinguished_name: String,
    pub description: String,
    pub member_distinguished_names: Vec<String>,
    pub is_admin_group: bool,
    /// Set when the record was absent from the latest complete snapshot.
    pub stale: bool,
    /// The Role this group backs, once imported.
    pub role_id: Option<RoleId>,
}

impl AdGroup {
    /// Create a mirrored group from a snapshot record.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the distinguished name is empty.
    pub fn from_record(record: &GroupRecord, admin_markers: &[String]) -> Result<Self, DomainError> {
        if record.distinguished_name.trim().is_empty() {
            return Err(DomainError::validation(
                "distinguished_name",
                "distinguished name must not be empty",
            ));
        }
        Ok(Self {
            id: AdGroupId::new(),
            common_name: record.common_name.clone(),
            distinguished_name: record.distinguished_name.clone(),
            description: record.description.clone(),
            member_distinguished_names: record.member_distinguished_names.clone(),
            is_admin_group: is_admin_name(&record.common_name, admin_markers),
            stale: false,
            role_id: None,
        })
    }

    /// Overwrite mutable attributes from a later snapshot record.
    ///
    /// Preserves the internal id and Role linkage, re-derives the admin
    /// flag and clears the stale marker. Returns true when anything changed.
    pub fn apply_record(&mut self, record: &GroupRecord, admin_markers: &[String]) -> bool {
        let before = (
            self.common_name.clone(),
            self.description.clone(),
            self.member_distinguished_names.clone(),
            self.is_admin_group,
            self.stale,
        );
        self.common_name = record.common_name.clone();
        self.description = record.description.clone();
        self.member_distinguished_names = record.member_distinguished_names.clone();
        self.is_admin_group = is_admin_name(&record.common_name, admin_markers);
        self.stale = false;
        before
            != (
                self.common_name.clone(),
                self.description.clone(),
                self.member_distinguished_names.clone(),
                self.is_admin_group,
                self.stale,
            )
    }

    /// Flag the record as absent from the latest snapshot.
    pub fn mark_stale(&mut self) {
        self.stale = true;
    }
}

/// Admin-group policy: the name contains any configured marker substring.
fn is_admin_name(common_name: &str, admin_markers: &[String]) -> bool {
    let name = common_name.to_lowercase();
    admin_markers
        .iter()
        .any(|marker| !marker.trim().is_empty() && name.contains(&marker.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> Vec<String> {
        vec!["admin".to_string()]
    }

    fn record(dn: &str, cn: &str) -> GroupRecord {
        GroupRecord {
            distinguished_name: dn.to_string(),
            common_name: cn.to_string(),
            description: String::new(),
            member_distinguished_names: vec![],
        }
    }

    #[test]
    fn admin_marker_match_is_case_insensitive() {
        let group =
            AdGroup::from_record(&record("CN=Finance-Admins,DC=example", "Finance-Admins"), &markers())
                .unwrap();
        assert!(group.is_admin_group);

        let plain = AdGroup::from_record(&record("CN=Sales,DC=example", "Sales"), &markers()).unwrap();
        assert!(!plain.is_admin_group);
    }

    #[test]
    fn apply_record_re_derives_admin_flag() {
        let mut group = AdGroup::from_record(&record("CN=Sales,DC=example", "Sales"), &markers()).unwrap();
        assert!(!group.is_admin_group);

        let changed = group.apply_record(&record("CN=Sales,DC=example", "Sales-Admins"), &markers());
        assert!(changed);
        assert!(group.is_admin_group);
    }

    #[test]
    fn apply_record_is_idempotent() {
        let snapshot = record("CN=Sales,DC=example", "Sales");
        let mut group = AdGroup::from_record(&snapshot, &markers()).unwrap();
        assert!(!group.apply_record(&snapshot, &markers()));
    }

    #[test]
    fn apply_record_preserves_role_linkage() {
        let snapshot = record("CN=Sales,DC=example", "Sales");
        let mut group = AdGroup::from_record(&snapshot, &markers()).unwrap();
        let role = RoleId::new();
        group.role_id = Some(role);
        group.mark_stale();

        group.apply_record(&snapshot, &markers());
        assert_eq!(group.role_id, Some(role));
        assert!(!group.stale);
    }
}
