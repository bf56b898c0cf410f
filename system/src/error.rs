use ember_election::ElectionError;
use ember_state::StateError;
use thiserror::Error;

/// Failures in the system-transition pipeline. All of these are fatal to
/// the enclosing block attempt: the proposer abandons the candidate block,
/// a verifier rejects the received one. Nothing is retried here.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Election(#[from] ElectionError),

    /// A synthetic call reverted on-chain.
    #[error("system call to {contract} reverted: {reason}")]
    ExecutionReverted { contract: String, reason: String },

    /// A synthetic call exhausted its gas allowance. The allowance is half
    /// of `u64::MAX`, so this indicates a defective contract rather than a
    /// tight limit.
    #[error("system call to {contract} ran out of gas")]
    GasExhausted { contract: String },

    /// While verifying a received block, the locally reconstructed system
    /// transaction did not match the proposer's, or the proposer's list was
    /// exhausted.
    #[error("received block's system transaction does not match the locally built one: {0}")]
    UnexpectedTransaction(String),
}
