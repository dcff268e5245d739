//! Decoder for the directory's `userAccountControl` bitfield.
//!
//! Keeping the bit tests in one pure function avoids scattering the raw
//! literals through the reconciliation logic.

use serde::{Deserialize, Serialize};

/// Bit set when the account is disabled.
pub const ACCOUNT_DISABLED: u32 = 0x0002;

/// Bit set when the account is locked out.
pub const LOCKOUT: u32 = 0x0010;

/// Bit set when the account's password never expires.
pub const DONT_EXPIRE_PASSWORD: u32 = 0x0001_0000;

/// Semantic account-state flags decoded from `userAccountControl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    pub enabled: bool,
    pub locked: bool,
    pub password_never_expires: bool,
}

/// Decode a raw `userAccountControl` value.
///
/// Total over all 32-bit inputs; unknown bits are ignored. Pure: the same
/// input always yields the same output.
pub fn decode(bitfield: u32) -> AccountState {
    AccountState {
        enabled: bitfield & ACCOUNT_DISABLED == 0,
        locked: bitfield & LOCKOUT != 0,
        password_never_expires: bitfield & DONT_EXPIRE_PASSWORD != 0,
    }
}
