//! GroupRoleSyncHandler - mirrors directory groups and imports them as Roles.

use std::collections::HashSet;
use std::sync::Arc;

use futures::StreamExt;
use tracing::{debug, info};

use crate::domain::foundation::{DomainError, ServiceResult, SyncCounts};
use crate::domain::identity::AdGroup;
use crate::domain::role::Role;
use crate::ports::{AdGroupRepository, AdUserRepository, DirectoryClient, RoleRepository};

/// Handler for the group reconciliation run.
///
/// Applies the same create/update/stale discipline as the account sync to
/// ADGroup records, and additionally backs every group with a Role:
/// - a group without a Role gets one (name = common name, classification
///   Standard, admin flag copied from the group's derivation), unless a
///   Role of that name exists and is not yet group-linked, in which case
///   the existing Role is linked instead of duplicated;
/// - an already group-linked Role is updated in description only. Admin
///   flag and classification are human-owned after import.
///
/// Member distinguished names seed the Role's ADUser links.
pub struct GroupRoleSyncHandler {
    ad_groups: Arc<dyn AdGroupRepository>,
    ad_users: Arc<dyn AdUserRepository>,
    roles: Arc<dyn RoleRepository>,
    admin_group_markers: Vec<String>,
}

impl GroupRoleSyncHandler {
    pub fn new(
        ad_groups: Arc<dyn AdGroupRepository>,
        ad_users: Arc<dyn AdUserRepository>,
        roles: Arc<dyn RoleRepository>,
        admin_group_markers: Vec<String>,
    ) -> Self {
        Self {
            ad_groups,
            ad_users,
            roles,
            admin_group_markers,
        }
    }

    /// Run one group synchronization against a fresh snapshot.
    ///
    /// # Errors
    ///
    /// - `Connectivity` when the snapshot cannot be opened or drops mid-stream
    /// - `StoreWrite` on a persistence failure (fail-fast)
    pub async fn handle(&self, client: &dyn DirectoryClient) -> Result<ServiceResult, DomainError> {
        let mut stream = client.list_groups().await?;
        let mut counts = SyncCounts::default();
        let mut seen_dns: HashSet<String> = HashSet::new();

        info!("starting group synchronization");

        while let Some(record) = stream.next().await {
            let record = record?;
            seen_dns.insert(record.distinguished_name.clone());

            let mut group = match self
                .ad_groups
                .find_by_distinguished_name(&record.distinguished_name)
                .await?
            {
                Some(mut existing) => {
                    if existing.apply_record(&record, &self.admin_group_markers) {
                        self.ad_groups.save(&existing).await?;
                        counts.updated += 1;
                    } else {
                        counts.unchanged += 1;
                    }
                    existing
                }
                None => {
                    let created = AdGroup::from_record(&record, &self.admin_group_markers)?;
                    self.ad_groups.save(&created).await?;
                    counts.created += 1;
                    debug!(dn = %created.distinguished_name, "created mirrored group");
                    created
                }
            };

            self.back_with_role(&mut group).await?;
        }

        for mut group in self.ad_groups.list_all().await? {
            if !seen_dns.contains(&group.distinguished_name) && !group.stale {
                group.mark_stale();
                self.ad_groups.save(&group).await?;
                counts.marked_stale += 1;
                debug!(dn = %group.distinguished_name, "marked group stale");
            }
        }

        info!(
            created = counts.created,
            updated = counts.updated,
            unchanged = counts.unchanged,
            marked_stale = counts.marked_stale,
            "group synchronization finished"
        );

        Ok(ServiceResult::sync_ok(
            format!(
                "Group synchronization finished: {} created, {} updated, {} unchanged, {} marked stale.",
                counts.created, counts.updated, counts.unchanged, counts.marked_stale
            ),
            counts,
        ))
    }

    /// Ensure the group backs a Role, then refresh the sync-owned Role
    /// fields (description, membership seeds).
    async fn back_with_role(&self, group: &mut AdGroup) -> Result<(), DomainError> {
        let mut role = match group.role_id {
            Some(role_id) => match self.roles.find_by_id(&role_id).await? {
                Some(role) => role,
                // role was removed by hand; re-import
                None => self.import_role(group).await?,
            },
            None => self.import_role(group).await?,
        };

        let mut role_changed = false;

        if role.description != group.description {
            role.description = group.description.clone();
            role_changed = true;
        }

        // seed ADUser links from the group's member list
        for member_dn in &group.member_distinguished_names {
            if let Some(member) = self.ad_users.find_by_distinguished_name(member_dn).await? {
                if role.link_ad_user(member.id) {
                    role_changed = true;
                }
            }
        }

        if role_changed {
            self.roles.save(&role).await?;
        }
        Ok(())
    }

    /// Create or link the Role backing a newly imported group.
    ///
    /// Name is the de-duplication key for this one-time linkage only.
    async fn import_role(&self, group: &mut AdGroup) -> Result<Role, DomainError> {
        let existing = self
            .roles
            .find_by_name(&group.common_name)
            .await?
            .into_iter()
            .find(|role| !role.is_group_linked());

        let role = match existing {
            Some(mut role) => {
                role.link_group(group.id);
                self.roles.save(&role).await?;
                debug!(role = %role.name, "linked group to existing role");
                role
            }
            None => {
                let role = Role::from_group(group)?;
                self.roles.save(&role).await?;
                debug!(role = %role.name, admin = role.is_admin_role, "imported role from group");
                role
            }
        };

        group.role_id = Some(role.id);
        self.ad_groups.save(group).await?;
        Ok(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::directory::FixtureDirectoryClient;
    use crate::adapters::memory::{InMemoryAdGroupStore, InMemoryAdUserStore, InMemoryRoleStore};
    use crate::domain::directory::{AccountRecord, GroupRecord};
    use crate::domain::identity::AdUser;
    use crate::domain::role::RoleResource;

    fn group_record(dn: &str, cn: &str, description: &str, members: Vec<&str>) -> GroupRecord {
        GroupRecord {
            distinguished_name: dn.to_string(),
            common_name: cn.to_string(),
            description: description.to_string(),
            member_distinguished_names: members.into_iter().map(str::to_string).collect(),
        }
    }

    struct Fixture {
        handler: GroupRoleSyncHandler,
        ad_groups: Arc<InMemoryAdGroupStore>,
        ad_users: Arc<InMemoryAdUserStore>,
        roles: Arc<InMemoryRoleStore>,
    }

    fn fixture() -> Fixture {
        let ad_groups = Arc::new(InMemoryAdGroupStore::new());
        let ad_users = Arc::new(InMemoryAdUserStore::new());
        let roles = Arc::new(InMemoryRoleStore::new());
        Fixture {
            handler: GroupRoleSyncHandler::new(
                ad_groups.clone(),
                ad_users.clone(),
                roles.clone(),
                vec!["admin".to_string()],
            ),
            ad_groups,
            ad_users,
            roles,
        }
    }

    #[tokio::test]
    async fn new_group_produces_exactly_one_standard_role() {
        let f = fixture();
        let client = FixtureDirectoryClient::new().with_groups(vec![group_record(
            "CN=Finance-Admins,DC=example",
            "Finance-Admins",
            "Finance administrators",
            vec![],
        )]);

        let result = f.handler.handle(&client).await.unwrap();
        assert!(result.success);

        let roles = f.roles.find_by_name("Finance-Admins").await.unwrap();
        assert_eq!(roles.len(), 1);
        assert!(roles[0].is_admin_role);
        assert_eq!(roles[0].resource, RoleResource::Standard);
    }

    #[tokio::test]
    async fn reimport_does_not_duplicate_the_role() {
        let f = fixture();
        let client = FixtureDirectoryClient::new().with_groups(vec![group_record(
            "CN=Finance-Admins,DC=example",
            "Finance-Admins",
            "",
            vec![],
        )]);

        f.handler.handle(&client).await.unwrap();
        f.handler.handle(&client).await.unwrap();

        assert_eq!(f.roles.find_by_name("Finance-Admins").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn reimport_does_not_reset_human_edited_admin_flag() {
        let f = fixture();
        let client = FixtureDirectoryClient::new().with_groups(vec![group_record(
            "CN=Finance-Admins,DC=example",
            "Finance-Admins",
            "",
            vec![],
        )]);
        f.handler.handle(&client).await.unwrap();

        // a human clears the admin flag after import
        let mut role = f
            .roles
            .find_by_name("Finance-Admins")
            .await
            .unwrap()
            .remove(0);
        role.is_admin_role = false;
        f.roles.save(&role).await.unwrap();

        f.handler.handle(&client).await.unwrap();

        let role = f
            .roles
            .find_by_name("Finance-Admins")
            .await
            .unwrap()
            .remove(0);
        assert!(!role.is_admin_role);
    }

    #[tokio::test]
    async fn later_sync_updates_role_description_only() {
        let f = fixture();
        let first = FixtureDirectoryClient::new().with_groups(vec![group_record(
            "CN=Sales,DC=example",
            "Sales",
            "old text",
            vec![],
        )]);
        f.handler.handle(&first).await.unwrap();

        let mut role = f.roles.find_by_name("Sales").await.unwrap().remove(0);
        role.resource = RoleResource::Organizational;
        f.roles.save(&role).await.unwrap();

        let second = FixtureDirectoryClient::new().with_groups(vec![group_record(
            "CN=Sales,DC=example",
            "Sales",
            "new text",
            vec![],
        )]);
        f.handler.handle(&second).await.unwrap();

        let role = f.roles.find_by_name("Sales").await.unwrap().remove(0);
        assert_eq!(role.description, "new text");
        assert_eq!(role.resource, RoleResource::Organizational);
    }

    #[tokio::test]
    async fn name_collision_links_existing_unlinked_role() {
        let f = fixture();
        let hand_made = Role::new("Sales").unwrap();
        f.roles.save(&hand_made).await.unwrap();

        let client = FixtureDirectoryClient::new().with_groups(vec![group_record(
            "CN=Sales,DC=example",
            "Sales",
            "",
            vec![],
        )]);
        f.handler.handle(&client).await.unwrap();

        let roles = f.roles.find_by_name("Sales").await.unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].id, hand_made.id);
        assert!(roles[0].is_group_linked());

        let group = f
            .ad_groups
            .find_by_distinguished_name("CN=Sales,DC=example")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(group.role_id, Some(hand_made.id));
    }

    #[tokio::test]
    async fn member_dns_seed_role_ad_user_links() {
        let f = fixture();
        let member = AdUser::from_record(&AccountRecord {
            distinguished_name: "CN=Ada,DC=example".to_string(),
            logon_name: "alovelace".to_string(),
            account_control: 512,
        })
        .unwrap();
        f.ad_users.save(&member).await.unwrap();

        let client = FixtureDirectoryClient::new().with_groups(vec![group_record(
            "CN=Sales,DC=example",
            "Sales",
            "",
            vec!["CN=Ada,DC=example", "CN=Unknown,DC=example"],
        )]);
        f.handler.handle(&client).await.unwrap();

        let role = f.roles.find_by_name("Sales").await.unwrap().remove(0);
        assert!(role.ad_user_ids.contains(&member.id));
        assert_eq!(role.ad_user_ids.len(), 1);
    }

    #[tokio::test]
    async fn absent_groups_are_marked_stale_not_deleted() {
        let f = fixture();
        let full = FixtureDirectoryClient::new().with_groups(vec![
            group_record("CN=Sales,DC=example", "Sales", "", vec![]),
            group_record("CN=Finance,DC=example", "Finance", "", vec![]),
        ]);
        f.handler.handle(&full).await.unwrap();

        let reduced = FixtureDirectoryClient::new()
            .with_groups(vec![group_record("CN=Sales,DC=example", "Sales", "", vec![])]);
        let result = f.handler.handle(&reduced).await.unwrap();
        assert_eq!(result.sync_counts().unwrap().marked_stale, 1);

        let finance = f
            .ad_groups
            .find_by_distinguished_name("CN=Finance,DC=example")
            .await
            .unwrap()
            .unwrap();
        assert!(finance.stale);
        // the backing role survives too
        assert_eq!(f.roles.find_by_name("Finance").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unreachable_directory_aborts_with_connectivity_error() {
        let f = fixture();
        let err = f
            .handler
            .handle(&FixtureDirectoryClient::unreachable())
            .await
            .unwrap_err();
        assert!(err.is_connectivity());
    }
}
