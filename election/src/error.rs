use ember_state::StateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ElectionError {
    /// A state query or codec operation failed.
    #[error(transparent)]
    State(#[from] StateError),

    /// A paginated registry read disagreed with itself: a page reported a
    /// different total than the first page, or the accumulated candidate
    /// count can never match the declared total. Reads are pinned to one
    /// historical block, so this should be impossible; it is checked
    /// defensively.
    #[error("candidate registry inconsistent: declared {declared} candidates, observed {observed}")]
    DataInconsistency { declared: u64, observed: u64 },

    /// A candidate page's parallel arrays (addresses, powers, vote keys)
    /// disagree in length.
    #[error("candidate page at offset {offset} has ragged arrays: {addresses} addresses, {powers} powers, {vote_keys} vote keys")]
    RaggedPage {
        offset: u64,
        addresses: usize,
        powers: usize,
        vote_keys: usize,
    },
}
