//! Role entity and its resource classification.

mod resource;
#[allow(clippy::module_inception)]
mod role;

pub use resource::RoleResource;
pub use role::Role;
