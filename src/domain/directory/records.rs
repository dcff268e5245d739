//! Snapshot record shapes yielded by the directory client.
//!
//! These are wire-free DTOs; the LDAP plumbing that produces them lives
//! behind the [`crate::ports::DirectoryClient`] port.

use serde::{Deserialize, Serialize};

/// One account record from a directory snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Stable external identifier.
    pub distinguished_name: String,
    /// Logon (sAMAccountName-style) name.
    pub logon_name: String,
    /// Raw `userAccountControl` bitfield.
    pub account_control: u32,
}

/// One group record from a directory snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    /// Stable external identifier.
    pub distinguished_name: String,
    /// Common name of the group.
    pub common_name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Distinguished names of the group's members.
    #[serde(default)]
    pub member_distinguished_names: Vec<String>,
}
