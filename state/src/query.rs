//! Read-only chain-state queries pinned to a historical block.

use crate::error::StateError;
use ember_types::{BlockHash, ValidatorAddress};

/// Read-only contract calls against state as of a specific block.
///
/// Every call is pinned to `at`, so a sequence of calls (e.g. the candidate
/// reader's pages) observes one consistent snapshot. Implementations own the
/// per-call query scope: open it, issue exactly one query, and release it on
/// every exit path — success, error, or panic unwinding.
pub trait ChainStateReader {
    /// Execute `data` as a read-only call to `to` against state at block
    /// `at`, returning the raw return data.
    fn call(
        &self,
        to: ValidatorAddress,
        data: &[u8],
        at: BlockHash,
    ) -> Result<Vec<u8>, StateError>;
}
