//! Internal identity entities mirrored from or correlated with the directory.

mod ad_group;
mod ad_user;
mod person;

pub use ad_group::AdGroup;
pub use ad_user::AdUser;
pub use person::Person;
