//! Stake-derived voting power and its fixed-width on-chain scaling.
//!
//! Raw voting power is a 256-bit integer (stake denominated in the chain's
//! smallest unit), far too wide for the elected-set contract field. Elected
//! validators carry power divided by [`POWER_SCALE`] and truncated into a
//! `u64`. Division by a positive constant preserves the relative ordering of
//! any set of candidates considered together, which is the property the
//! election actually depends on.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Divisor applied when compressing raw voting power to its scaled `u64`
/// on-chain representation: `10^10`.
pub const POWER_SCALE: u64 = 10_000_000_000;

/// A candidate's raw, stake-derived voting power.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VotingPower(U256);

impl VotingPower {
    pub const ZERO: Self = Self(U256::zero());

    pub fn new(raw: U256) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Whether this power is strictly positive — the election's admission
    /// criterion.
    pub fn is_positive(&self) -> bool {
        !self.0.is_zero()
    }

    /// Compress to the fixed-width on-chain representation:
    /// `floor(raw / 10^10)`, saturating at `u64::MAX` if the quotient still
    /// exceeds 64 bits. Saturation (rather than silent high-bit truncation)
    /// keeps the scaled values ordered the same way as the raw ones.
    pub fn scaled(&self) -> u64 {
        let q = self.0 / U256::from(POWER_SCALE);
        if q > U256::from(u64::MAX) {
            u64::MAX
        } else {
            q.as_u64()
        }
    }
}

impl From<U256> for VotingPower {
    fn from(raw: U256) -> Self {
        Self(raw)
    }
}

impl From<u64> for VotingPower {
    fn from(raw: u64) -> Self {
        Self(U256::from(raw))
    }
}

impl From<u128> for VotingPower {
    fn from(raw: u128) -> Self {
        Self(U256::from(raw))
    }
}

impl fmt::Display for VotingPower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
