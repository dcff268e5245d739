//! Automatic Person-to-Role assignment.

mod planner;

pub use planner::AssignmentPlanner;
