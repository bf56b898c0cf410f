//! System-transition pipeline for the Ember PoSA engine.
//!
//! Consensus-level contract calls — publishing a freshly elected validator
//! set, initializing fork-activated contracts — travel as synthetic
//! "system" transactions that every node executes identically during block
//! construction and verification.
//!
//! - [`message`] — packaging a contract method call as a [`SystemMessage`].
//! - [`applier`] — ordered, all-or-nothing application of system messages
//!   against the in-progress block.
//! - [`epoch`] — the per-epoch orchestration: read candidates, elect,
//!   publish.
//!
//! [`SystemMessage`]: ember_state::SystemMessage

pub mod applier;
pub mod epoch;
pub mod error;
pub mod message;

pub use applier::{apply_transition, apply_transitions, SYSTEM_CALL_GAS_LIMIT};
pub use epoch::{EpochOrchestrator, EpochStage};
pub use error::SystemError;
pub use message::MessageBuilder;
