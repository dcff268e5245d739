//! AssignmentPlanner - links Persons to Organizational Roles by
//! department name.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{AssignmentCounts, DomainError, PersonId, ServiceResult};
use crate::domain::identity::Person;
use crate::domain::role::{Role, RoleResource};
use crate::ports::{PersonRepository, RoleRepository};

/// Plans and applies automatic Person-to-Role assignments.
///
/// Matching rule: exact, case-insensitive equality between a Person's
/// department name and an Organizational Role's name. Ambiguous role
/// names (two Organizational Roles sharing one name) are skipped for
/// every Person and reported as a warning; correctness over best-effort
/// matching.
pub struct AssignmentPlanner {
    persons: Arc<dyn PersonRepository>,
    roles: Arc<dyn RoleRepository>,
}

impl AssignmentPlanner {
    pub fn new(persons: Arc<dyn PersonRepository>, roles: Arc<dyn RoleRepository>) -> Self {
        Self { persons, roles }
    }

    /// Assign the selected Persons (all, when `person_ids` is `None`) to
    /// the Organizational Role matching their department name.
    ///
    /// Idempotent: re-running adds no duplicate edges.
    ///
    /// # Errors
    ///
    /// `StoreWrite` on a persistence failure (fail-fast).
    pub async fn assign_automatically(
        &self,
        person_ids: Option<HashSet<PersonId>>,
    ) -> Result<ServiceResult, DomainError> {
        let organizational = self.roles.list_by_resource(RoleResource::Organizational).await?;

        // index by lowercase name; more than one role per name is a
        // data-quality defect upstream
        let mut by_name: HashMap<String, Vec<Role>> = HashMap::new();
        for role in organizational {
            by_name.entry(role.name.to_lowercase()).or_default().push(role);
        }
        let mut ambiguous: Vec<String> = by_name
            .values()
            .filter(|roles| roles.len() > 1)
            .map(|roles| roles[0].name.clone())
            .collect();
        ambiguous.sort();
        for name in &ambiguous {
            warn!(role = %name, "duplicate organizational role name; skipping assignment for it");
        }

        let selected: Vec<Person> = match &person_ids {
            Some(ids) if !ids.is_empty() => {
                let mut persons = Vec::with_capacity(ids.len());
                for id in ids {
                    if let Some(person) = self.persons.find_by_id(id).await? {
                        persons.push(person);
                    }
                }
                persons
            }
            _ => self.persons.list_all().await?,
        };

        let mut counts = AssignmentCounts::default();
        for mut person in selected {
            let Some(department) = person
                .department_name
                .clone()
                .filter(|d| !d.trim().is_empty())
            else {
                counts.persons_skipped += 1;
                continue;
            };

            match by_name.get_mut(&department.to_lowercase()) {
                Some(roles) if roles.len() == 1 => {
                    let role = &mut roles[0];
                    if role.assign_person(person.id) {
                        self.roles.save(role).await?;
                        counts.edges_added += 1;
                    }
                    if person.link_role(role.id) {
                        self.persons.save(&person).await?;
                    }
                }
                // zero matches or an ambiguous name: skip, not an error
                _ => counts.persons_skipped += 1,
            }
        }

        info!(
            edges_added = counts.edges_added,
            persons_skipped = counts.persons_skipped,
            "automatic assignment finished"
        );

        let message = if ambiguous.is_empty() {
            format!(
                "Automatic assignment finished: {} assignments added, {} persons skipped.",
                counts.edges_added, counts.persons_skipped
            )
        } else {
            format!(
                "Automatic assignment finished: {} assignments added, {} persons skipped. \
                 Warning: duplicate organizational role names skipped: {}.",
                counts.edges_added,
                counts.persons_skipped,
                ambiguous.join(", ")
            )
        };

        Ok(ServiceResult::assignment_ok(message, counts))
    }

    /// Every Person whose department name equals the given Role name.
    ///
    /// Single-role analogue of the bulk planner; uses the same
    /// case-insensitive equality rule so both paths agree.
    pub async fn find_all_persons_with_department_name(
        &self,
        role_name: &str,
    ) -> Result<Vec<Person>, DomainError> {
        self.persons.find_by_department_name(role_name).await
    }
}
