//! Side-effecting execution of system calls against the in-progress block.

use crate::error::StateError;
use ember_types::ValidatorAddress;
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// A consensus-constructed call payload: originates from the block's
/// coinbase, targets a system contract, carries zero value.
///
/// Ephemeral — built and consumed within one state transition; only the
/// resulting synthetic transaction and receipt persist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemMessage {
    pub from: ValidatorAddress,
    pub to: ValidatorAddress,
    pub value: U256,
    pub data: Vec<u8>,
}

/// How an executed call ended on-chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    Succeeded,
    /// The call reverted; the reason string is best-effort diagnostics.
    Reverted(String),
    /// The call ran out of its gas allowance.
    OutOfGas,
}

/// Result of executing one call: gas consumed plus the on-chain outcome.
///
/// An on-chain failure (revert, out-of-gas) is an *outcome*, not a
/// transport error — the distinction lets callers map the two failure
/// classes to different error kinds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub gas_used: u64,
    pub status: ExecutionStatus,
}

impl ExecutionOutcome {
    pub fn succeeded(gas_used: u64) -> Self {
        Self {
            gas_used,
            status: ExecutionStatus::Succeeded,
        }
    }

    pub fn reverted(gas_used: u64, reason: impl Into<String>) -> Self {
        Self {
            gas_used,
            status: ExecutionStatus::Reverted(reason.into()),
        }
    }

    pub fn out_of_gas(gas_used: u64) -> Self {
        Self {
            gas_used,
            status: ExecutionStatus::OutOfGas,
        }
    }
}

/// Executes calls with side effects against the block under construction.
///
/// Backed by the execution engine; state mutations land in the in-progress
/// block's state and are discarded with it if the block is abandoned.
pub trait StateExecutor {
    fn execute(
        &mut self,
        msg: &SystemMessage,
        gas_limit: u64,
    ) -> Result<ExecutionOutcome, StateError>;
}
