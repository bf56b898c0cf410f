//! Candidate and elected-validator records.

use ember_types::{ValidatorAddress, VoteKey, VotingPower};
use serde::{Deserialize, Serialize};

/// One registered validator candidate, as read from the stake registry.
/// Immutable for the duration of one election.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorCandidate {
    pub address: ValidatorAddress,
    pub voting_power: VotingPower,
    /// Consensus vote key, if the candidate registered one. Carried inside
    /// the candidate record so it can never detach from its address during
    /// selection.
    pub vote_key: Option<VoteKey>,
}

impl ValidatorCandidate {
    pub fn new(address: ValidatorAddress, voting_power: VotingPower) -> Self {
        Self {
            address,
            voting_power,
            vote_key: None,
        }
    }

    pub fn with_vote_key(
        address: ValidatorAddress,
        voting_power: VotingPower,
        vote_key: VoteKey,
    ) -> Self {
        Self {
            address,
            voting_power,
            vote_key: Some(vote_key),
        }
    }
}

/// A validator admitted to the elected set, with its power compressed to
/// the fixed-width on-chain representation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectedValidator {
    pub address: ValidatorAddress,
    /// `floor(raw_voting_power / 10^10)`.
    pub scaled_power: u64,
    pub vote_key: Option<VoteKey>,
}

/// The ordered elected validator set for the upcoming epoch.
///
/// Invariants, maintained by construction in [`crate::select_top_k`]:
/// - every member had strictly positive raw voting power;
/// - members are ordered by descending raw power, ties by ascending
///   address;
/// - no address appears twice;
/// - length never exceeds the chain's elected-validator cap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectedSet(Vec<ElectedValidator>);

impl ElectedSet {
    pub(crate) fn from_ordered(members: Vec<ElectedValidator>) -> Self {
        Self(members)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn members(&self) -> &[ElectedValidator] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElectedValidator> {
        self.0.iter()
    }

    /// The elected addresses in set order.
    pub fn addresses(&self) -> Vec<ValidatorAddress> {
        self.0.iter().map(|v| v.address).collect()
    }

    /// The scaled powers in set order, index-aligned with [`addresses`].
    ///
    /// [`addresses`]: Self::addresses
    pub fn scaled_powers(&self) -> Vec<u64> {
        self.0.iter().map(|v| v.scaled_power).collect()
    }

    /// The vote keys in set order, empty bytes standing in for candidates
    /// that registered none (the registry contract expects index-aligned
    /// arrays).
    pub fn vote_keys(&self) -> Vec<Vec<u8>> {
        self.0
            .iter()
            .map(|v| {
                v.vote_key
                    .as_ref()
                    .map(|k| k.as_bytes().to_vec())
                    .unwrap_or_default()
            })
            .collect()
    }
}

impl IntoIterator for ElectedSet {
    type Item = ElectedValidator;
    type IntoIter = std::vec::IntoIter<ElectedValidator>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
