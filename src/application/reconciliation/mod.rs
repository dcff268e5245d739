//! Reconciliation engine.
//!
//! Diffs a directory snapshot against the internal store and applies
//! create/update/stale decisions. Each record is processed and persisted
//! independently, so re-running after a partial failure is always safe
//! and converges to the same end state.

mod sync_accounts;
mod sync_groups;

pub use sync_accounts::AccountSyncHandler;
pub use sync_groups::GroupRoleSyncHandler;
