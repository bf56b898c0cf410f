//! Paginated candidate reads from the stake registry.
//!
//! The registry exposes its candidate list through a bounded iterator:
//! `getValidatorWithVotingPower(offset, limit)` returns one page of
//! parallel arrays plus the total candidate count. Pages are fetched
//! strictly sequentially — each offset is the length accumulated so far —
//! and every call is pinned to the parent block, so the whole read observes
//! one snapshot.

use crate::error::ElectionError;
use crate::validator::ValidatorCandidate;
use ember_state::{AbiCodec, AbiValue, ChainStateReader, StateError};
use ember_types::{BlockHash, SystemContracts, VoteKey, VotingPower};
use primitive_types::U256;
use tracing::debug;

/// Candidates requested per registry call.
pub const CANDIDATE_PAGE_SIZE: u64 = 100;

const METHOD_GET_CANDIDATES: &str = "getValidatorWithVotingPower";
const METHOD_MAX_ELECTED: &str = "maxElectedValidators";

/// One decoded page of the registry's candidate iterator.
struct CandidatePage {
    candidates: Vec<ValidatorCandidate>,
    total: u64,
}

/// Reads validator candidates and election parameters from the stake
/// registry, as of a fixed historical block.
pub struct CandidateReader<'a, C, A> {
    chain: &'a C,
    codec: &'a A,
    contracts: &'a SystemContracts,
}

impl<'a, C, A> CandidateReader<'a, C, A>
where
    C: ChainStateReader,
    A: AbiCodec,
{
    pub fn new(chain: &'a C, codec: &'a A, contracts: &'a SystemContracts) -> Self {
        Self {
            chain,
            codec,
            contracts,
        }
    }

    /// Fetch the full candidate list as of `parent`.
    ///
    /// Accumulates pages until the declared total is reached. Fails with
    /// [`ElectionError::DataInconsistency`] if the registry's declared
    /// total drifts between pages, a short page makes the total
    /// unreachable, or the accumulated length overshoots it.
    pub fn fetch_candidates(
        &self,
        parent: BlockHash,
    ) -> Result<Vec<ValidatorCandidate>, ElectionError> {
        let mut candidates: Vec<ValidatorCandidate> = Vec::new();
        let mut declared: Option<u64> = None;

        loop {
            let offset = candidates.len() as u64;
            let page = self.fetch_page(parent, offset)?;

            let total = *declared.get_or_insert(page.total);
            if page.total != total {
                return Err(ElectionError::DataInconsistency {
                    declared: total,
                    observed: page.total,
                });
            }

            let accumulated = offset + page.candidates.len() as u64;
            if accumulated > total || (page.candidates.is_empty() && accumulated < total) {
                return Err(ElectionError::DataInconsistency {
                    declared: total,
                    observed: accumulated,
                });
            }

            debug!(offset, fetched = page.candidates.len(), total, "fetched candidate page");
            candidates.extend(page.candidates);

            if candidates.len() as u64 == total {
                return Ok(candidates);
            }
        }
    }

    /// Read the chain-configured elected-validator cap K as of `parent`.
    pub fn fetch_max_elected_validators(&self, parent: BlockHash) -> Result<u64, ElectionError> {
        let data = self.codec.encode(METHOD_MAX_ELECTED, &[])?;
        let result = self
            .chain
            .call(self.contracts.stake_registry, &data, parent)?;
        let values = self.codec.decode(METHOD_MAX_ELECTED, &result)?;

        let max = values
            .first()
            .ok_or_else(|| StateError::decode(METHOD_MAX_ELECTED, "empty result"))?
            .as_uint(METHOD_MAX_ELECTED)?;
        Ok(clamp_u64(max))
    }

    fn fetch_page(&self, parent: BlockHash, offset: u64) -> Result<CandidatePage, ElectionError> {
        let data = self.codec.encode(
            METHOD_GET_CANDIDATES,
            &[
                AbiValue::Uint(U256::from(offset)),
                AbiValue::Uint(U256::from(CANDIDATE_PAGE_SIZE)),
            ],
        )?;
        let result = self
            .chain
            .call(self.contracts.stake_registry, &data, parent)?;
        let values = self.codec.decode(METHOD_GET_CANDIDATES, &result)?;

        if values.len() != 4 {
            return Err(StateError::decode(
                METHOD_GET_CANDIDATES,
                format!("expected 4 values, got {}", values.len()),
            )
            .into());
        }

        let addresses = values[0].as_list(METHOD_GET_CANDIDATES)?;
        let powers = values[1].as_list(METHOD_GET_CANDIDATES)?;
        let vote_keys = values[2].as_list(METHOD_GET_CANDIDATES)?;
        let total = clamp_u64(values[3].as_uint(METHOD_GET_CANDIDATES)?);

        if addresses.len() != powers.len() || addresses.len() != vote_keys.len() {
            return Err(ElectionError::RaggedPage {
                offset,
                addresses: addresses.len(),
                powers: powers.len(),
                vote_keys: vote_keys.len(),
            });
        }

        let mut candidates = Vec::with_capacity(addresses.len());
        for ((addr, power), key) in addresses.iter().zip(powers).zip(vote_keys) {
            let address = addr.as_address(METHOD_GET_CANDIDATES)?;
            let voting_power = VotingPower::new(power.as_uint(METHOD_GET_CANDIDATES)?);
            let key_bytes = key.as_bytes(METHOD_GET_CANDIDATES)?;
            let vote_key = if key_bytes.is_empty() {
                None
            } else {
                Some(VoteKey::from(key_bytes))
            };
            candidates.push(ValidatorCandidate {
                address,
                voting_power,
                vote_key,
            });
        }

        Ok(CandidatePage { candidates, total })
    }
}

fn clamp_u64(value: U256) -> u64 {
    if value > U256::from(u64::MAX) {
        u64::MAX
    } else {
        value.as_u64()
    }
}
