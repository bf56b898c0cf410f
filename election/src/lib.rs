//! Validator election for the Ember PoSA engine.
//!
//! At each epoch boundary the chain re-elects its validator set from
//! on-chain stake. This crate covers the read-and-rank half of that flow:
//!
//! - [`candidates`] — paginated reads of the stake registry's candidate
//!   list, pinned to the parent block, with consistency checks.
//! - [`top_k`] — bounded streaming selection of the K highest-staked
//!   candidates with a deterministic tie-break.
//! - [`validator`] — candidate and elected-validator records.
//! - [`error`] — election error types.
//!
//! Determinism is the governing constraint throughout: every node must
//! produce a bit-identical elected set from the same chain state, or the
//! chain forks.

pub mod candidates;
pub mod error;
pub mod top_k;
pub mod validator;

pub use candidates::{CandidateReader, CANDIDATE_PAGE_SIZE};
pub use error::ElectionError;
pub use top_k::select_top_k;
pub use validator::{ElectedSet, ElectedValidator, ValidatorCandidate};
