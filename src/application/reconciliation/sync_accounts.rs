//! AccountSyncHandler - mirrors directory accounts into ADUser records.

use std::collections::HashSet;
use std::sync::Arc;

use futures::StreamExt;
use tracing::{debug, info};

use crate::domain::foundation::{DomainError, ServiceResult, SyncCounts};
use crate::domain::identity::AdUser;
use crate::ports::{AdUserRepository, DirectoryClient, PersonRepository};

/// Handler for the account reconciliation run.
///
/// Enumerates the snapshot once, in order, upserting one ADUser per account
/// record and correlating each to a Person by central account name. Stale
/// marking happens only after a complete enumeration; a connectivity failure
/// mid-stream aborts the run, keeping whatever was committed before it.
pub struct AccountSyncHandler {
    ad_users: Arc<dyn AdUserRepository>,
    persons: Arc<dyn PersonRepository>,
}

impl AccountSyncHandler {
    pub fn new(ad_users: Arc<dyn AdUserRepository>, persons: Arc<dyn PersonRepository>) -> Self {
        Self { ad_users, persons }
    }

    /// Run one account synchronization against a fresh snapshot.
    ///
    /// # Errors
    ///
    /// - `Connectivity` when the snapshot cannot be opened or drops mid-stream
    /// - `StoreWrite` on a persistence failure (fail-fast)
    pub async fn handle(&self, client: &dyn DirectoryClient) -> Result<ServiceResult, DomainError> {
        let mut stream = client.list_accounts().await?;
        let mut counts = SyncCounts::default();
        let mut seen_dns: HashSet<String> = HashSet::new();

        info!("starting account synchronization");

        while let Some(record) = stream.next().await {
            let record = record?;
            seen_dns.insert(record.distinguished_name.clone());

            let mut user = match self
                .ad_users
                .find_by_distinguished_name(&record.distinguished_name)
                .await?
            {
                Some(mut existing) => {
                    if existing.apply_record(&record) {
                        self.ad_users.save(&existing).await?;
                        counts.updated += 1;
                    } else {
                        counts.unchanged += 1;
                    }
                    existing
                }
                None => {
                    let created = AdUser::from_record(&record)?;
                    self.ad_users.save(&created).await?;
                    counts.created += 1;
                    debug!(dn = %created.distinguished_name, "created mirrored account");
                    created
                }
            };

            self.correlate_person(&mut user).await?;
        }

        // The enumeration completed, so absence is evidence: flag every
        // record the snapshot did not contain. Never delete.
        for mut user in self.ad_users.list_all().await? {
            if !seen_dns.contains(&user.distinguished_name) && !user.stale {
                user.mark_stale();
                self.ad_users.save(&user).await?;
                counts.marked_stale += 1;
                debug!(dn = %user.distinguished_name, "marked account stale");
            }
        }

        info!(
            created = counts.created,
            updated = counts.updated,
            unchanged = counts.unchanged,
            marked_stale = counts.marked_stale,
            "account synchronization finished"
        );

        Ok(ServiceResult::sync_ok(
            format!(
                "Account synchronization finished: {} created, {} updated, {} unchanged, {} marked stale.",
                counts.created, counts.updated, counts.unchanged, counts.marked_stale
            ),
            counts,
        ))
    }

    /// Best-effort, non-destructive Person correlation.
    ///
    /// Attaches the account to the Person whose central account name matches
    /// the logon name. Never detaches an existing, different linkage.
    async fn correlate_person(&self, user: &mut AdUser) -> Result<(), DomainError> {
        if user.person_id.is_some() {
            return Ok(());
        }
        let Some(mut person) = self
            .persons
            .find_by_central_account_name(&user.logon_name)
            .await?
        else {
            return Ok(());
        };

        if user.link_person(person.id) {
            self.ad_users.save(user).await?;
        }
        if person.link_ad_user(user.id) {
            self.persons.save(&person).await?;
            debug!(
                dn = %user.distinguished_name,
                person = %person.id,
                "correlated account to person"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::directory::FixtureDirectoryClient;
    use crate::adapters::memory::{InMemoryAdUserStore, InMemoryPersonStore};
    use crate::domain::directory::AccountRecord;
    use crate::domain::identity::Person;

    fn record(dn: &str, logon: &str, control: u32) -> AccountRecord {
        AccountRecord {
            distinguished_name: dn.to_string(),
            logon_name: logon.to_string(),
            account_control: control,
        }
    }

    fn handler() -> (AccountSyncHandler, Arc<InMemoryAdUserStore>, Arc<InMemoryPersonStore>) {
        let ad_users = Arc::new(InMemoryAdUserStore::new());
        let persons = Arc::new(InMemoryPersonStore::new());
        (
            AccountSyncHandler::new(ad_users.clone(), persons.clone()),
            ad_users,
            persons,
        )
    }

    #[tokio::test]
    async fn creates_mirrored_accounts_from_snapshot() {
        let (handler, ad_users, _) = handler();
        let client = FixtureDirectoryClient::new().with_accounts(vec![
            record("CN=Ada,DC=example", "alovelace", 512),
            record("CN=Grace,DC=example", "ghopper", 514),
        ]);

        let result = handler.handle(&client).await.unwrap();
        assert!(result.success);
        assert_eq!(result.sync_counts().unwrap().created, 2);

        let grace = ad_users
            .find_by_distinguished_name("CN=Grace,DC=example")
            .await
            .unwrap()
            .unwrap();
        assert!(!grace.enabled);
    }

    #[tokio::test]
    async fn second_run_on_identical_snapshot_changes_nothing() {
        let (handler, _, _) = handler();
        let client = FixtureDirectoryClient::new()
            .with_accounts(vec![record("CN=Ada,DC=example", "alovelace", 512)]);

        handler.handle(&client).await.unwrap();
        let second = handler.handle(&client).await.unwrap();

        let counts = second.sync_counts().unwrap();
        assert_eq!(counts.created, 0);
        assert_eq!(counts.updated, 0);
        assert_eq!(counts.unchanged, 1);
    }

    #[tokio::test]
    async fn update_preserves_internal_id() {
        let (handler, ad_users, _) = handler();
        let first = FixtureDirectoryClient::new()
            .with_accounts(vec![record("CN=Ada,DC=example", "alovelace", 512)]);
        handler.handle(&first).await.unwrap();
        let original = ad_users
            .find_by_distinguished_name("CN=Ada,DC=example")
            .await
            .unwrap()
            .unwrap();

        let second = FixtureDirectoryClient::new()
            .with_accounts(vec![record("CN=Ada,DC=example", "ada.lovelace", 514)]);
        let result = handler.handle(&second).await.unwrap();
        assert_eq!(result.sync_counts().unwrap().updated, 1);

        let updated = ad_users
            .find_by_distinguished_name("CN=Ada,DC=example")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.logon_name, "ada.lovelace");
    }

    #[tokio::test]
    async fn absent_accounts_are_marked_stale_not_deleted() {
        let (handler, ad_users, _) = handler();
        let full = FixtureDirectoryClient::new().with_accounts(vec![
            record("CN=Ada,DC=example", "alovelace", 512),
            record("CN=Grace,DC=example", "ghopper", 512),
        ]);
        handler.handle(&full).await.unwrap();

        let reduced = FixtureDirectoryClient::new()
            .with_accounts(vec![record("CN=Ada,DC=example", "alovelace", 512)]);
        let result = handler.handle(&reduced).await.unwrap();
        assert_eq!(result.sync_counts().unwrap().marked_stale, 1);

        let grace = ad_users
            .find_by_distinguished_name("CN=Grace,DC=example")
            .await
            .unwrap()
            .unwrap();
        assert!(grace.stale);
    }

    #[tokio::test]
    async fn reappearing_account_clears_stale_marker() {
        let (handler, ad_users, _) = handler();
        let full = FixtureDirectoryClient::new()
            .with_accounts(vec![record("CN=Ada,DC=example", "alovelace", 512)]);
        handler.handle(&full).await.unwrap();
        handler
            .handle(&FixtureDirectoryClient::new())
            .await
            .unwrap();
        handler.handle(&full).await.unwrap();

        let ada = ad_users
            .find_by_distinguished_name("CN=Ada,DC=example")
            .await
            .unwrap()
            .unwrap();
        assert!(!ada.stale);
    }

    #[tokio::test]
    async fn correlates_person_by_central_account_name() {
        let (handler, _, persons) = handler();
        let person = Person::new("Lovelace", "Ada")
            .unwrap()
            .with_central_account_name("ALovelace");
        persons.save(&person).await.unwrap();

        let client = FixtureDirectoryClient::new()
            .with_accounts(vec![record("CN=Ada,DC=example", "alovelace", 512)]);
        handler.handle(&client).await.unwrap();

        let linked = persons.find_by_id(&person.id).await.unwrap().unwrap();
        assert_eq!(linked.ad_user_ids.len(), 1);
    }

    #[tokio::test]
    async fn correlation_never_reassigns_existing_linkage() {
        let (handler, ad_users, persons) = handler();
        let client = FixtureDirectoryClient::new()
            .with_accounts(vec![record("CN=Ada,DC=example", "alovelace", 512)]);
        handler.handle(&client).await.unwrap();

        // hand-link the account to a person without the matching account name
        let owner = Person::new("Byron", "Annabella").unwrap();
        persons.save(&owner).await.unwrap();
        let mut user = ad_users
            .find_by_distinguished_name("CN=Ada,DC=example")
            .await
            .unwrap()
            .unwrap();
        user.link_person(owner.id);
        ad_users.save(&user).await.unwrap();

        // a person with the matching central account name appears later
        let late = Person::new("Lovelace", "Ada")
            .unwrap()
            .with_central_account_name("alovelace");
        persons.save(&late).await.unwrap();

        handler.handle(&client).await.unwrap();

        let user = ad_users
            .find_by_distinguished_name("CN=Ada,DC=example")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.person_id, Some(owner.id));
        let late = persons.find_by_id(&late.id).await.unwrap().unwrap();
        assert!(late.ad_user_ids.is_empty());
    }

    #[tokio::test]
    async fn mid_stream_failure_aborts_and_keeps_prior_commits() {
        let (handler, ad_users, _) = handler();
        let client = FixtureDirectoryClient::new()
            .with_accounts(vec![
                record("CN=Ada,DC=example", "alovelace", 512),
                record("CN=Grace,DC=example", "ghopper", 512),
            ])
            .failing_accounts_after(1);

        let err = handler.handle(&client).await.unwrap_err();
        assert!(err.is_connectivity());

        // the first record was committed before the failure
        assert!(ad_users
            .find_by_distinguished_name("CN=Ada,DC=example")
            .await
            .unwrap()
            .is_some());
        // and no stale marking happened on the incomplete pass
        let all = ad_users.list_all().await.unwrap();
        assert!(all.iter().all(|u| !u.stale));
    }

    struct FailingSaveAdUserStore {
        inner: InMemoryAdUserStore,
    }

    #[async_trait::async_trait]
    impl AdUserRepository for FailingSaveAdUserStore {
        async fn save(&self, _user: &AdUser) -> Result<(), DomainError> {
            Err(DomainError::store_write("simulated save failure"))
        }

        async fn find_by_id(
            &self,
            id: &crate::domain::foundation::AdUserId,
        ) -> Result<Option<AdUser>, DomainError> {
            self.inner.find_by_id(id).await
        }

        async fn find_by_distinguished_name(
            &self,
            dn: &str,
        ) -> Result<Option<AdUser>, DomainError> {
            self.inner.find_by_distinguished_name(dn).await
        }

        async fn search(&self, term: &str) -> Result<Vec<AdUser>, DomainError> {
            self.inner.search(term).await
        }

        async fn list_all(&self) -> Result<Vec<AdUser>, DomainError> {
            self.inner.list_all().await
        }

        async fn count(&self) -> Result<u64, DomainError> {
            self.inner.count().await
        }

        async fn count_password_never_expires(&self) -> Result<u64, DomainError> {
            self.inner.count_password_never_expires().await
        }
    }

    #[tokio::test]
    async fn store_write_failure_aborts_the_run() {
        let ad_users = Arc::new(FailingSaveAdUserStore {
            inner: InMemoryAdUserStore::new(),
        });
        let persons = Arc::new(InMemoryPersonStore::new());
        let handler = AccountSyncHandler::new(ad_users, persons);

        let client = FixtureDirectoryClient::new()
            .with_accounts(vec![record("CN=Ada,DC=example", "alovelace", 512)]);
        let err = handler.handle(&client).await.unwrap_err();
        assert_eq!(err.code, crate::domain::foundation::ErrorCode::StoreWrite);
    }

    #[tokio::test]
    async fn unreachable_directory_aborts_with_connectivity_error() {
        let (handler, ad_users, _) = handler();
        let err = handler
            .handle(&FixtureDirectoryClient::unreachable())
            .await
            .unwrap_err();
        assert!(err.is_connectivity());
        assert!(ad_users.list_all().await.unwrap().is_empty());
    }
}
