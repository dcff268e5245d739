//! Shared domain building blocks: errors, identifiers and job results.

mod errors;
mod ids;
mod service_result;

pub use errors::{DomainError, ErrorCode};
pub use ids::{AdGroupId, AdUserId, JobId, PersonId, RoleId, SessionKey};
pub use service_result::{AssignmentCounts, ServiceCounts, ServiceResult, SyncCounts};
