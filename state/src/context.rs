//! Block-scoped execution context.

use crate::transaction::{Receipt, SyntheticTransaction};
use std::collections::VecDeque;

/// The mutable aggregate for the block currently being built or verified.
///
/// Owned exclusively by the single block-processing call that created it;
/// competing blocks (speculative validation) each get their own context.
/// The system-transition applier only ever appends — existing entries are
/// never replaced or reordered.
#[derive(Debug, Default)]
pub struct BlockExecutionContext {
    /// Transactions applied so far, in application order.
    pub transactions: Vec<SyntheticTransaction>,
    /// One receipt per applied transaction, index-aligned.
    pub receipts: Vec<Receipt>,
    /// When verifying a received block: the proposer's transactions not yet
    /// matched against locally reconstructed ones, in block order.
    pub received_transactions: VecDeque<SyntheticTransaction>,
    /// Running total of gas consumed in this block.
    pub used_gas: u64,
    /// True when proposing (mining) a block; false when verifying a
    /// received one.
    pub mining: bool,
}

impl BlockExecutionContext {
    /// Context for the block-proposal path.
    pub fn for_mining() -> Self {
        Self {
            mining: true,
            ..Self::default()
        }
    }

    /// Context for the verification path, seeded with the transactions the
    /// received block carries.
    pub fn for_verification(received: impl IntoIterator<Item = SyntheticTransaction>) -> Self {
        Self {
            received_transactions: received.into_iter().collect(),
            mining: false,
            ..Self::default()
        }
    }

    /// Append an applied transaction with its receipt and account its gas.
    pub fn append(&mut self, tx: SyntheticTransaction, receipt: Receipt) {
        self.used_gas = self.used_gas.saturating_add(receipt.gas_used);
        self.transactions.push(tx);
        self.receipts.push(receipt);
    }

    /// Dequeue the next received transaction awaiting a match, if any.
    pub fn next_received(&mut self) -> Option<SyntheticTransaction> {
        self.received_transactions.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::ReceiptStatus;
    use ember_types::ValidatorAddress;
    use primitive_types::U256;

    fn tx(data: u8) -> SyntheticTransaction {
        SyntheticTransaction {
            from: ValidatorAddress::new([1u8; 20]),
            to: ValidatorAddress::new([2u8; 20]),
            value: U256::zero(),
            data: vec![data],
            gas_limit: 0,
        }
    }

    #[test]
    fn append_keeps_lists_aligned_and_accounts_gas() {
        let mut ctx = BlockExecutionContext::for_mining();
        ctx.append(tx(1), Receipt { status: ReceiptStatus::Succeeded, gas_used: 21_000 });
        ctx.append(tx(2), Receipt { status: ReceiptStatus::Succeeded, gas_used: 9_000 });

        assert_eq!(ctx.transactions.len(), 2);
        assert_eq!(ctx.receipts.len(), 2);
        assert_eq!(ctx.used_gas, 30_000);
    }

    #[test]
    fn verification_context_dequeues_in_block_order() {
        let mut ctx = BlockExecutionContext::for_verification([tx(1), tx(2)]);
        assert!(!ctx.mining);
        assert_eq!(ctx.next_received().unwrap().data, vec![1]);
        assert_eq!(ctx.next_received().unwrap().data, vec![2]);
        assert!(ctx.next_received().is_none());
    }
}
