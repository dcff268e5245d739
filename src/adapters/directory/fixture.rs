//! Fixture directory client.
//!
//! Serves canned snapshots for tests and demos, including simulated
//! connectivity failures at a chosen point in the enumeration. Each call
//! yields a fresh stream over the current fixture data, mirroring the
//! "new snapshot per run" contract of a real client.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};

use crate::domain::directory::{AccountRecord, GroupRecord};
use crate::domain::foundation::DomainError;
use crate::ports::{DirectoryClient, RecordStream};

/// Canned-snapshot directory client.
pub struct FixtureDirectoryClient {
    accounts: Vec<AccountRecord>,
    groups: Vec<GroupRecord>,
    unreachable: bool,
    /// When set, account enumeration fails after yielding this many records.
    fail_accounts_after: Option<usize>,
}

impl FixtureDirectoryClient {
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
            groups: Vec::new(),
            unreachable: false,
            fail_accounts_after: None,
        }
    }

    /// Set the account records served by the next snapshots.
    pub fn with_accounts(mut self, accounts: Vec<AccountRecord>) -> Self {
        self.accounts = accounts;
        self
    }

    /// Set the group records served by the next snapshots.
    pub fn with_groups(mut self, groups: Vec<GroupRecord>) -> Self {
        self.groups = groups;
        self
    }

    /// Simulate an unreachable endpoint: every operation fails.
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::new()
        }
    }

    /// Simulate connectivity dropping after `n` account records.
    pub fn failing_accounts_after(mut self, n: usize) -> Self {
        self.fail_accounts_after = Some(n);
        self
    }

    fn connectivity_error() -> DomainError {
        DomainError::connectivity("directory endpoint unreachable")
    }
}

impl Default for FixtureDirectoryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectoryClient for FixtureDirectoryClient {
    async fn test_connection(&self) -> Result<(), DomainError> {
        if self.unreachable {
            return Err(Self::connectivity_error());
        }
        Ok(())
    }

    async fn list_accounts(&self) -> Result<RecordStream<'_, AccountRecord>, DomainError> {
        if self.unreachable {
            return Err(Self::connectivity_error());
        }
        let items: Vec<Result<AccountRecord, DomainError>> = match self.fail_accounts_after {
            Some(n) => self
                .accounts
                .iter()
                .take(n)
                .cloned()
                .map(Ok)
                .chain(std::iter::once(Err(DomainError::connectivity(
                    "connection lost during account enumeration",
                ))))
                .collect(),
            None => self.accounts.iter().cloned().map(Ok).collect(),
        };
        Ok(stream::iter(items).boxed())
    }

    async fn list_groups(&self) -> Result<RecordStream<'_, GroupRecord>, DomainError> {
        if self.unreachable {
            return Err(Self::connectivity_error());
        }
        let items: Vec<Result<GroupRecord, DomainError>> =
            self.groups.iter().cloned().map(Ok).collect();
        Ok(stream::iter(items).boxed())
    }
}
