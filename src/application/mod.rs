//! Application layer: reconciliation, assignment, identity maintenance
//! and background-job execution.

pub mod assignment;
pub mod identity;
pub mod jobs;
pub mod reconciliation;
