//! Seams between the consensus core and the execution layer.
//!
//! The election and system-transition crates never touch the execution
//! engine, the ABI encoder, or persistent state directly. They work against
//! the traits defined here:
//!
//! - [`ChainStateReader`] — read-only contract calls pinned to a historical
//!   block (backed by the node's state-query layer).
//! - [`StateExecutor`] — side-effecting calls against the block currently
//!   under construction (backed by the execution engine).
//! - [`AbiCodec`] — opaque encode/decode of contract method calls.
//!
//! [`BlockExecutionContext`] is the block-scoped aggregate the transition
//! applier appends to: synthetic transactions, their receipts, and the
//! running gas total.

pub mod abi;
pub mod context;
pub mod error;
pub mod executor;
pub mod query;
pub mod transaction;

pub use abi::{AbiCodec, AbiValue};
pub use context::BlockExecutionContext;
pub use error::StateError;
pub use executor::{ExecutionOutcome, ExecutionStatus, StateExecutor, SystemMessage};
pub use query::ChainStateReader;
pub use transaction::{Receipt, ReceiptStatus, SyntheticTransaction};
