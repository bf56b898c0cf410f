//! Applying system messages to the in-progress block.
//!
//! Messages for one logical step are applied strictly in the order supplied;
//! the first failure short-circuits the rest and poisons the whole block.
//! Effects of earlier successes stay in the in-progress state — there is no
//! rollback, because the caller discards the entire block on error.

use crate::error::SystemError;
use ember_state::{
    BlockExecutionContext, ExecutionStatus, Receipt, ReceiptStatus, StateExecutor,
    SyntheticTransaction, SystemMessage,
};
use tracing::{debug, warn};

/// Gas allowance for a system call. Half of `u64::MAX`: effectively
/// unlimited, so system calls are never gas-constrained in practice.
pub const SYSTEM_CALL_GAS_LIMIT: u64 = u64::MAX / 2;

/// Execute one system message and record its effects in the block context.
///
/// On the proposal path (`ctx.mining`) the synthetic transaction is simply
/// appended. On the verification path it must first match the next
/// transaction the received block carries — a proposer and verifier that
/// disagree here are building different blocks.
pub fn apply_transition<X: StateExecutor>(
    executor: &mut X,
    msg: &SystemMessage,
    ctx: &mut BlockExecutionContext,
) -> Result<(), SystemError> {
    let tx = SyntheticTransaction {
        from: msg.from,
        to: msg.to,
        value: msg.value,
        data: msg.data.clone(),
        gas_limit: SYSTEM_CALL_GAS_LIMIT,
    };

    if !ctx.mining {
        let expected = ctx.next_received().ok_or_else(|| {
            SystemError::UnexpectedTransaction(format!(
                "block carries no transaction for system call to {}",
                msg.to
            ))
        })?;
        if expected != tx {
            warn!(contract = %msg.to, "received block's system transaction differs from local reconstruction");
            return Err(SystemError::UnexpectedTransaction(format!(
                "call to {} differs from the block's transaction to {}",
                msg.to, expected.to
            )));
        }
    }

    let outcome = executor.execute(msg, SYSTEM_CALL_GAS_LIMIT)?;
    match outcome.status {
        ExecutionStatus::Succeeded => {
            debug!(contract = %msg.to, gas_used = outcome.gas_used, "applied system call");
            ctx.append(
                tx,
                Receipt {
                    status: ReceiptStatus::Succeeded,
                    gas_used: outcome.gas_used,
                },
            );
            Ok(())
        }
        ExecutionStatus::Reverted(reason) => Err(SystemError::ExecutionReverted {
            contract: msg.to.to_string(),
            reason,
        }),
        ExecutionStatus::OutOfGas => Err(SystemError::GasExhausted {
            contract: msg.to.to_string(),
        }),
    }
}

/// Apply a sequence of system messages in order, stopping at the first
/// failure.
pub fn apply_transitions<X: StateExecutor>(
    executor: &mut X,
    msgs: &[SystemMessage],
    ctx: &mut BlockExecutionContext,
) -> Result<(), SystemError> {
    for msg in msgs {
        apply_transition(executor, msg, ctx)?;
    }
    Ok(())
}
