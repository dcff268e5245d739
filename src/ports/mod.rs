//! Ports - async interfaces between the engine and its collaborators.

mod ad_group_repository;
mod ad_user_repository;
mod directory_client;
mod person_repository;
mod role_repository;

pub use ad_group_repository::AdGroupRepository;
pub use ad_user_repository::AdUserRepository;
pub use directory_client::{DirectoryClient, RecordStream};
pub use person_repository::PersonRepository;
pub use role_repository::RoleRepository;
