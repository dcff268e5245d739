//! Terminal outcome of a submitted synchronization or assignment job.
//!
//! A `ServiceResult` is transient: it is produced exactly once per job,
//! broadcast to the registered sessions and never persisted.

use serde::{Deserialize, Serialize};

/// Counts produced by a reconciliation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncCounts {
    /// Records newly created in the internal store.
    pub created: u32,
    /// Records whose mutable attributes were overwritten.
    pub updated: u32,
    /// Records already matching the snapshot.
    pub unchanged: u32,
    /// Records absent from the snapshot and flagged stale.
    pub marked_stale: u32,
}

/// Counts produced by an automatic assignment run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentCounts {
    /// Person-to-Role edges newly added.
    pub edges_added: u32,
    /// Persons skipped (no match, empty department or ambiguous role name).
    pub persons_skipped: u32,
}

/// Structured counts attached to a [`ServiceResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCounts {
    Sync(SyncCounts),
    Assignment(AssignmentCounts),
}

/// Outcome of a background job, delivered once to each registered session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceResult {
    /// Whether the run completed without an aborting error.
    pub success: bool,
    /// Human-readable outcome (or warning/error) message.
    pub message: String,
    /// Structured counts, when the run got far enough to produce them.
    pub counts: Option<ServiceCounts>,
}

impl ServiceResult {
    /// Successful outcome without structured counts.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            counts: None,
        }
    }

    /// Successful reconciliation outcome.
    pub fn sync_ok(message: impl Into<String>, counts: SyncCounts) -> Self {
        Self {
            success: true,
            message: message.into(),
            counts: Some(ServiceCounts::Sync(counts)),
        }
    }

    /// Successful assignment outcome.
    pub fn assignment_ok(message: impl Into<String>, counts: AssignmentCounts) -> Self {
        Self {
            success: true,
            message: message.into(),
            counts: Some(ServiceCounts::Assignment(counts)),
        }
    }

    /// Failed outcome.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            counts: None,
        }
    }

    /// The sync counts, when present.
    pub fn sync_counts(&self) -> Option<&SyncCounts> {
        match &self.counts {
            Some(ServiceCounts::Sync(c)) => Some(c),
            _ => None,
        }
    }

    /// The assignment counts, when present.
    pub fn assignment_counts(&self) -> Option<&AssignmentCounts> {
        match &self.counts {
            Some(ServiceCounts::Assignment(c)) => Some(c),
            _ => None,
        }
    }
}
