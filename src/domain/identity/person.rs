//! Person entity - the internal identity record.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AdUserId, DomainError, PersonId, RoleId};

/// An internal identity record.
///
/// The central account name, when present, is the correlation key that
/// links a Person to directory accounts during reconciliation. It must
/// be unique across Persons; the store enforces this on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub surname: String,
    pub given_name: String,
    pub central_account_name: Option<String>,
    pub department_name: Option<String>,
    pub description: Option<String>,
    pub is_employee: bool,
    pub role_ids: HashSet<RoleId>,
    pub ad_user_ids: HashSet<AdUserId>,
}

impl Person {
    /// Create a new Person.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the surname is empty.
    pub fn new(surname: impl Into<String>, given_name: impl Into<String>) -> Result<Self, DomainError> {
        let surname = surname.into();
        if surname.trim().is_empty() {
            return Err(DomainError::validation("surname", "surname must not be empty"));
        }
        Ok(Self {
            id: PersonId::new(),
            surname,
            given_name: given_name.into(),
            central_account_name: None,
            department_name: None,
            description: None,
            is_employee: true,
            role_ids: HashSet::new(),
            ad_user_ids: HashSet::new(),
        })
    }

    /// Builder-style central account name.
    pub fn with_central_account_name(mut self, name: impl Into<String>) -> Self {
        self.central_account_name = Some(name.into());
        self
    }

    /// Builder-style department (organizational unit) name.
    pub fn with_department_name(mut self, name: impl Into<String>) -> Self {
        self.department_name = Some(name.into());
        self
    }

    /// Whether the central account name equals `logon_name`, case-insensitively.
    ///
    /// Unicode case folding, so umlauted names compare the same way
    /// everywhere names are matched.
    pub fn matches_central_account(&self, logon_name: &str) -> bool {
        self.central_account_name
            .as_deref()
            .map(|n| n.to_lowercase() == logon_name.to_lowercase())
            .unwrap_or(false)
    }

    /// Whether the department name equals `name`, case-insensitively.
    ///
    /// An empty or absent department never matches.
    pub fn matches_department(&self, name: &str) -> bool {
        self.department_name
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(|d| d.to_lowercase() == name.to_lowercase())
            .unwrap_or(false)
    }

    /// Link a directory account. Returns true when the link is new.
    pub fn link_ad_user(&mut self, id: AdUserId) -> bool {
        self.ad_user_ids.insert(id)
    }

    /// Unlink a directory account.
    pub fn unlink_ad_user(&mut self, id: &AdUserId) -> bool {
        self.ad_user_ids.remove(id)
    }

    /// Link a role. Returns true when the link is new.
    pub fn link_role(&mut self, id: RoleId) -> bool {
        self.role_ids.insert(id)
    }

    /// Unlink a role.
    pub fn unlink_role(&mut self, id: &RoleId) -> bool {
        self.role_ids.remove(id)
    }
}
