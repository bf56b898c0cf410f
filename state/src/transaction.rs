//! Synthetic transactions and their receipts.
//!
//! A system message that executed successfully is recorded in the block as a
//! synthetic transaction plus an index-aligned receipt. Both become part of
//! the block's hash-committed content, so their field set and ordering are
//! consensus-critical.

use ember_types::ValidatorAddress;
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// A consensus-constructed pseudo-transaction, as committed into the block.
///
/// Equality ignores `gas_limit`: when verifying a received block, the local
/// node reconstructs the transaction and compares it against the proposer's
/// copy on the consensus-committed fields only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SyntheticTransaction {
    pub from: ValidatorAddress,
    pub to: ValidatorAddress,
    pub value: U256,
    pub data: Vec<u8>,
    pub gas_limit: u64,
}

impl PartialEq for SyntheticTransaction {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.value == other.value
            && self.data == other.data
    }
}

impl Eq for SyntheticTransaction {}

/// Outcome status recorded in a receipt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiptStatus {
    Succeeded,
    Reverted,
}

/// Execution receipt for one transaction, index-aligned with the block's
/// transaction list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub status: ReceiptStatus,
    pub gas_used: u64,
}
