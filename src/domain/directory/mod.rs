//! Directory-native value decoding and snapshot record shapes.

mod account_control;
mod records;

pub use account_control::{decode, AccountState, ACCOUNT_DISABLED, DONT_EXPIRE_PASSWORD, LOCKOUT};
pub use records::{AccountRecord, GroupRecord};
