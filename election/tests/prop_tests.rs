use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

use ember_election::{select_top_k, ValidatorCandidate};
use ember_types::{ValidatorAddress, VotingPower, POWER_SCALE};

/// Candidate multisets with unique addresses and arbitrary powers
/// (including zero).
fn candidates() -> impl Strategy<Value = Vec<ValidatorCandidate>> {
    // Powers stay below 2^90 so the scaled quotient always fits in u64 and
    // floor division is exact (no saturation).
    prop::collection::hash_map(prop::array::uniform20(0u8..), 0u128..1u128 << 90, 0..60)
        .prop_map(|entries| {
            entries
                .into_iter()
                .map(|(bytes, power)| {
                    ValidatorCandidate::new(ValidatorAddress::new(bytes), VotingPower::from(power))
                })
                .collect()
        })
        .prop_shuffle()
}

proptest! {
    /// len(select_top_k(c, k)) == min(k, |{power > 0}|).
    #[test]
    fn length_law(candidates in candidates(), k in 0usize..70) {
        let positive = candidates.iter().filter(|c| c.voting_power.is_positive()).count();
        let set = select_top_k(candidates, k);
        prop_assert_eq!(set.len(), k.min(positive));
    }

    /// Output ordering: strictly descending raw-power order, ties broken by
    /// strictly ascending address; no duplicates, no zero powers.
    #[test]
    fn output_is_canonically_ordered(candidates in candidates(), k in 0usize..70) {
        let raw: HashMap<ValidatorAddress, VotingPower> = candidates
            .iter()
            .map(|c| (c.address, c.voting_power))
            .collect();
        let set = select_top_k(candidates, k);

        let mut seen = HashSet::new();
        for member in set.iter() {
            prop_assert!(seen.insert(member.address));
            prop_assert!(raw[&member.address].is_positive());
        }
        for pair in set.members().windows(2) {
            let (hi, lo) = (&pair[0], &pair[1]);
            let hi_raw = raw[&hi.address];
            let lo_raw = raw[&lo.address];
            prop_assert!(
                hi_raw > lo_raw || (hi_raw == lo_raw && hi.address < lo.address)
            );
        }
    }

    /// Feeding the same multiset in a different order yields the identical
    /// sequence — arrival order must never leak into consensus output.
    #[test]
    fn permutation_invariance(candidates in candidates(), k in 0usize..70) {
        let mut reordered = candidates.clone();
        reordered.reverse();
        let len = reordered.len();
        if len > 2 {
            reordered.rotate_left(len / 2);
        }
        prop_assert_eq!(select_top_k(candidates, k), select_top_k(reordered, k));
    }

    /// Every emitted member's scaled power is floor(raw / 10^10).
    #[test]
    fn scaled_power_is_floor_of_raw(candidates in candidates(), k in 0usize..70) {
        let raw: HashMap<ValidatorAddress, VotingPower> = candidates
            .iter()
            .map(|c| (c.address, c.voting_power))
            .collect();
        let set = select_top_k(candidates, k);
        for member in set.iter() {
            let expected = raw[&member.address].raw() / POWER_SCALE;
            prop_assert_eq!(primitive_types::U256::from(member.scaled_power), expected);
        }
    }

    /// Every excluded positive-power candidate is weaker (under the total
    /// order) than every member — the set really is the top K.
    #[test]
    fn no_stronger_candidate_left_out(candidates in candidates(), k in 1usize..70) {
        let set = select_top_k(candidates.clone(), k);
        let elected: HashSet<ValidatorAddress> = set.iter().map(|m| m.address).collect();
        let raw: HashMap<ValidatorAddress, VotingPower> = candidates
            .iter()
            .map(|c| (c.address, c.voting_power))
            .collect();

        if set.len() == k {
            if let Some(weakest) = set.members().last() {
                let weakest_power = raw[&weakest.address];
                for candidate in &candidates {
                    if elected.contains(&candidate.address) {
                        continue;
                    }
                    prop_assert!(
                        candidate.voting_power < weakest_power
                            || (candidate.voting_power == weakest_power
                                && candidate.address > weakest.address)
                    );
                }
            }
        }
    }
}
