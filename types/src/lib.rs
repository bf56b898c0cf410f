//! Fundamental types for the Ember PoSA consensus core.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: validator addresses, block hashes, stake-derived voting power
//! with its on-chain scaling rule, consensus vote keys, and the well-known
//! system-contract configuration.

pub mod address;
pub mod contracts;
pub mod hash;
pub mod keys;
pub mod power;

pub use address::{AddressParseError, ValidatorAddress};
pub use contracts::SystemContracts;
pub use hash::BlockHash;
pub use keys::VoteKey;
pub use power::{VotingPower, POWER_SCALE};
