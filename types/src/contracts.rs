//! Well-known system-contract addresses.
//!
//! System contracts live at fixed, privileged addresses baked into the chain
//! configuration. They are injected into each consensus component at
//! construction — resolved once, never looked up through mutable process
//! state.

use crate::address::ValidatorAddress;
use serde::{Deserialize, Serialize};

/// Address configuration for the contracts the consensus core talks to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemContracts {
    /// The stake registry: holds validator candidates, their voting power
    /// and vote keys, and the elected-set publication entry point.
    pub stake_registry: ValidatorAddress,
    /// Contracts that receive a one-time `initialize` call at their fork
    /// activation block, in application order.
    pub fork_activated: Vec<ValidatorAddress>,
}

impl SystemContracts {
    /// Configuration where the stake registry is the only contract that
    /// needs fork-activation initialization.
    pub fn new(stake_registry: ValidatorAddress) -> Self {
        Self {
            stake_registry,
            fork_activated: vec![stake_registry],
        }
    }

    pub fn with_fork_activated(
        stake_registry: ValidatorAddress,
        fork_activated: Vec<ValidatorAddress>,
    ) -> Self {
        Self {
            stake_registry,
            fork_activated,
        }
    }
}
