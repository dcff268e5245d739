//! RoleResource - the classification governing assignment policy.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a Role.
///
/// Only `Organizational` roles participate in name-based automatic
/// Person assignment. `Standard` is the default for roles not
/// otherwise classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleResource {
    #[default]
    Standard,
    Organizational,
    Project,
    FileShare,
    EmailResource,
}

impl RoleResource {
    /// Whether roles of this classification are matched against
    /// department names during automatic assignment.
    pub fn is_organizational(&self) -> bool {
        matches!(self, RoleResource::Organizational)
    }
}

impl fmt::Display for RoleResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoleResource::Standard => "Standard",
            RoleResource::Organizational => "Organizational",
            RoleResource::Project => "Project",
            RoleResource::FileShare => "File share",
            RoleResource::EmailResource => "E-mail resource",
        };
        write!(f, "{}", s)
    }
}
