//! JobRunner - executes synchronization operations off the calling task.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::application::assignment::AssignmentPlanner;
use crate::application::reconciliation::{AccountSyncHandler, GroupRoleSyncHandler};
use crate::domain::foundation::{DomainError, JobId, PersonId, ServiceResult};
use crate::ports::DirectoryClient;

use super::SessionRegistry;

/// The operation a submission runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    AccountSync,
    GroupRoleSync,
    AutomaticAssignment,
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobKind::AccountSync => "account-sync",
            JobKind::GroupRoleSync => "group-role-sync",
            JobKind::AutomaticAssignment => "automatic-assignment",
        };
        write!(f, "{}", s)
    }
}

/// Handle to a submitted job.
///
/// The job runs regardless of what happens to the handle; dropping it
/// does not cancel anything. Joining is optional; results also arrive
/// through the [`SessionRegistry`] broadcast.
pub struct JobHandle {
    pub id: JobId,
    pub kind: JobKind,
    pub submitted_at: DateTime<Utc>,
    task: JoinHandle<ServiceResult>,
}

impl JobHandle {
    /// Wait for the terminal result of this job.
    pub async fn join(self) -> ServiceResult {
        match self.task.await {
            Ok(result) => result,
            // a panicking job is an engine defect; surface it as a failure
            Err(join_error) => ServiceResult::failure(format!("job aborted: {join_error}")),
        }
    }
}

/// Submits reconciliation and assignment operations.
///
/// Each submission starts immediately on its own task and reaches exactly
/// one terminal state. Concurrent mutating submissions over overlapping
/// data are the caller's responsibility to serialize; the store discipline
/// is last-writer-wins per record.
pub struct JobRunner {
    directory: Arc<dyn DirectoryClient>,
    account_sync: Arc<AccountSyncHandler>,
    group_sync: Arc<GroupRoleSyncHandler>,
    planner: Arc<AssignmentPlanner>,
    registry: Arc<SessionRegistry>,
}

impl JobRunner {
    pub fn new(
        directory: Arc<dyn DirectoryClient>,
        account_sync: Arc<AccountSyncHandler>,
        group_sync: Arc<GroupRoleSyncHandler>,
        planner: Arc<AssignmentPlanner>,
        registry: Arc<SessionRegistry>,
    ) -> Self {
        Self {
            directory,
            account_sync,
            group_sync,
            planner,
            registry,
        }
    }

    /// The registry jobs broadcast their results to.
    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Submit an account reconciliation run.
    pub fn submit_account_sync(&self) -> JobHandle {
        let handler = Arc::clone(&self.account_sync);
        let directory = Arc::clone(&self.directory);
        self.spawn(JobKind::AccountSync, async move {
            handler.handle(directory.as_ref()).await
        })
    }

    /// Submit a group-to-role reconciliation run.
    pub fn submit_group_role_sync(&self) -> JobHandle {
        let handler = Arc::clone(&self.group_sync);
        let directory = Arc::clone(&self.directory);
        self.spawn(JobKind::GroupRoleSync, async move {
            handler.handle(directory.as_ref()).await
        })
    }

    /// Submit an automatic assignment run over the selected Persons
    /// (all Persons when `person_ids` is `None`).
    pub fn submit_automatic_assignment(
        &self,
        person_ids: Option<HashSet<PersonId>>,
    ) -> JobHandle {
        let planner = Arc::clone(&self.planner);
        self.spawn(JobKind::AutomaticAssignment, async move {
            planner.assign_automatically(person_ids).await
        })
    }

    fn spawn<F>(&self, kind: JobKind, operation: F) -> JobHandle
    where
        F: std::future::Future<Output = Result<ServiceResult, DomainError>> + Send + 'static,
    {
        let id = JobId::new();
        let registry = Arc::clone(&self.registry);

        let task = tokio::spawn(async move {
            info!(job = %id, kind = %kind, "job started");
            // every fault becomes a terminal ServiceResult here; nothing
            // propagates as an uncaught error to the caller
            let result = match operation.await {
                Ok(result) => result,
                Err(e) => {
                    error!(job = %id, kind = %kind, error = %e, "job failed");
                    ServiceResult::failure(e.to_string())
                }
            };
            let delivered = registry.deliver(&result);
            info!(
                job = %id,
                kind = %kind,
                success = result.success,
                sessions_notified = delivered,
                "job finished"
            );
            result
        });

        JobHandle {
            id,
            kind,
            submitted_at: Utc::now(),
            task,
        }
    }
}
