//! Background-job execution and result delivery.
//!
//! A submitted operation runs on its own tokio task, reaches exactly one
//! terminal [`crate::domain::foundation::ServiceResult`] and broadcasts it
//! to every session registered at that moment. There is no cancellation
//! and no built-in retry; a retry is a new submission.

mod runner;
mod session_registry;

pub use runner::{JobHandle, JobKind, JobRunner};
pub use session_registry::SessionRegistry;
