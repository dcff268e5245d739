//! ADUser entity - a mirrored directory account.

use serde::{Deserialize, Serialize};

use crate::domain::directory::{self, AccountRecord};
use crate::domain::foundation::{AdUserId, DomainError, PersonId};

/// A mirrored directory account.
///
/// The distinguished name is the natural key: it is never reassigned to a
/// different record, and snapshot updates overwrite mutable attributes while
/// preserving the internal id and any Person linkage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdUser {
    pub id: AdUserId,
    pub logon_name: String,
    pub distinguished_name: String,
    /// Raw `userAccountControl` bitfield as last seen in the directory.
    pub account_control: u32,
    pub enabled: bool,
    pub password_expires: bool,
    /// Set when the record was absent from the latest complete snapshot.
    pub stale: bool,
    pub person_id: Option<PersonId>,
}

impl AdUser {
    /// Create a mirrored account from a snapshot record.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the distinguished name is empty.
    pub fn from_record(record: &AccountRecord) -> Result<Self, DomainError> {
        if record.distinguished_name.trim().is_empty() {
            return Err(DomainError::validation(
                "distinguished_name",
                "distinguished name must not be empty",
            ));
        }
        let mut user = Self {
            id: AdUserId::new(),
            logon_name: record.logon_name.clone(),
            distinguished_name: record.distinguished_name.clone(),
            account_control: record.account_control,
            enabled: true,
            password_expires: true,
            stale: false,
            person_id: None,
        };
        user.apply_account_control(record.account_control);
        Ok(user)
    }

    /// Overwrite mutable attributes from a later snapshot record.
    ///
    /// Preserves the internal id and Person linkage, and clears the stale
    /// marker. Returns true when anything actually changed.
    pub fn apply_record(&mut self, record: &AccountRecord) -> bool {
        let before = (
            self.logon_name.clone(),
            self.account_control,
            self.enabled,
            self.password_expires,
            self.stale,
        );
        self.logon_name = record.logon_name.clone();
        self.apply_account_control(record.account_control);
        self.stale = false;
        before
            != (
                self.logon_name.clone(),
                self.account_control,
                self.enabled,
                self.password_expires,
                self.stale,
            )
    }

    /// Flag the record as absent from the latest snapshot.
    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    /// Attach the Person correlation. Returns true when newly attached.
    ///
    /// Never reassigns an existing, different linkage.
    pub fn link_person(&mut self, person_id: PersonId) -> bool {
        match self.person_id {
            Some(_) => false,
            None => {
                self.person_id = Some(person_id);
                true
            }
        }
    }

    /// Detach the Person correlation.
    pub fn unlink_person(&mut self) {
        self.person_id = None;
    }

    fn apply_account_control(&mut self, bitfield: u32) {
        let state = directory::decode(bitfield);
        self.account_control = bitfield;
        self.enabled = state.enabled;
        self.password_expires = state.enabled && !state.password_never_expires;
    }
}
