//! Bounded streaming top-K selection.
//!
//! N registered candidates can far exceed K, the elected-validator cap, so
//! selection keeps only K candidates in memory: O(N log K) time, O(K)
//! auxiliary space. The result must be bit-identical on every node for any
//! permutation of the same input — a divergence here is a chain fork.

use crate::validator::{ElectedSet, ElectedValidator, ValidatorCandidate};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A candidate under the election's strict total order: higher voting power
/// is stronger; on equal power the lower address is stronger. Addresses are
/// unique, so no two candidates compare equal — this totality is what makes
/// boundary decisions permutation-invariant when powers tie exactly at the
/// K-th place.
struct Ranked(ValidatorCandidate);

impl Ranked {
    fn cmp_rank(&self, other: &Self) -> Ordering {
        self.0
            .voting_power
            .cmp(&other.0.voting_power)
            .then_with(|| other.0.address.cmp(&self.0.address))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_rank(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp_rank(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_rank(other)
    }
}

/// Select the `k` candidates with the highest voting power.
///
/// Candidates with zero power are never admitted, ordering is descending
/// raw power with ties broken by ascending address, and each survivor's
/// power is compressed via [`ember_types::VotingPower::scaled`]. Returns an
/// empty set for `k == 0` or when no candidate has positive power.
pub fn select_top_k(candidates: Vec<ValidatorCandidate>, k: usize) -> ElectedSet {
    if k == 0 {
        return ElectedSet::default();
    }

    let mut survivors: Vec<ValidatorCandidate> = candidates
        .into_iter()
        .filter(|c| c.voting_power.is_positive())
        .collect();

    if survivors.len() > k {
        // Min-oriented heap of the K strongest seen so far: the weakest
        // held candidate sits at the top. A streamed candidate evicts it
        // only when strictly stronger under the total order.
        let mut held: BinaryHeap<Reverse<Ranked>> = BinaryHeap::with_capacity(k + 1);
        for candidate in survivors.drain(..) {
            let incoming = Ranked(candidate);
            if held.len() < k {
                held.push(Reverse(incoming));
                continue;
            }
            let stronger_than_weakest = matches!(
                held.peek(),
                Some(Reverse(weakest)) if incoming.cmp_rank(weakest) == Ordering::Greater
            );
            if stronger_than_weakest {
                held.pop();
                held.push(Reverse(incoming));
            }
        }
        survivors = held.into_iter().map(|Reverse(Ranked(c))| c).collect();
    }

    // Both paths end with the same uniform sort, so the output order never
    // depends on which path produced the survivors.
    survivors.sort_unstable_by(|a, b| {
        b.voting_power
            .cmp(&a.voting_power)
            .then_with(|| a.address.cmp(&b.address))
    });

    ElectedSet::from_ordered(
        survivors
            .into_iter()
            .map(|c| ElectedValidator {
                address: c.address,
                scaled_power: c.voting_power.scaled(),
                vote_key: c.vote_key,
            })
            .collect(),
    )
}
