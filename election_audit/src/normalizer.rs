use log::{debug, info};
use std::collections::HashMap;

use crate::config::{NameCorrection, VoteRecord};

/// A name is never rare if it has at least this many votes.
pub const MIN_VOTES_FLOOR: u64 = 5;
/// For large elections, a name is rare below one vote in this many.
pub const RARE_NAME_DIVISOR: u64 = 1000;
/// Names further apart than this are considered distinct candidates.
pub const MAX_EDIT_DISTANCE: usize = 2;

/// The number of votes under which a name is considered to be a typo.
pub fn min_votes(total_votes: u64) -> u64 {
    (total_votes / RARE_NAME_DIVISOR).max(MIN_VOTES_FLOOR)
}

/// Edit distance with insertions, deletions, substitutions and transpositions
/// of adjacent characters, computed up to `cap`.
///
/// Any distance greater than `cap` is returned as `cap + 1`.
pub fn bounded_distance(a: &str, b: &str, cap: usize) -> usize {
    let la = a.chars().count();
    let lb = b.chars().count();
    if la.abs_diff(lb) > cap {
        return cap + 1;
    }
    strsim::osa_distance(a, b).min(cap + 1)
}

/// Counts the raw names, in the order in which they first appear.
fn count_names(votes: &[VoteRecord]) -> Vec<(String, u64)> {
    let mut order: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for v in votes.iter() {
        if let Some(&idx) = index.get(&v.candidate) {
            order[idx].1 += 1;
        } else {
            index.insert(v.candidate.clone(), order.len());
            order.push((v.candidate.clone(), 1));
        }
    }
    order
}

/// Finds the corrections of the rare names, without applying them.
///
/// A rare name is mapped to the first common name (in order of appearance)
/// within `MAX_EDIT_DISTANCE`. Rare names never absorb other names.
pub fn find_corrections(votes: &[VoteRecord]) -> Vec<NameCorrection> {
    let counts = count_names(votes);
    let threshold = min_votes(votes.len() as u64);
    debug!(
        "find_corrections: {} distinct names, min_votes: {}",
        counts.len(),
        threshold
    );

    let (rare, common): (Vec<&(String, u64)>, Vec<&(String, u64)>) =
        counts.iter().partition(|(_, c)| *c < threshold);

    let mut res: Vec<NameCorrection> = Vec::new();
    for (rare_name, rare_count) in rare {
        let target = common.iter().find(|(name, _)| {
            bounded_distance(rare_name, name, MAX_EDIT_DISTANCE) <= MAX_EDIT_DISTANCE
        });
        match target {
            Some((name, _)) => {
                debug!("find_corrections: {:?} -> {:?}", rare_name, name);
                res.push(NameCorrection {
                    from: rare_name.clone(),
                    to: name.clone(),
                    votes: *rare_count,
                });
            }
            None => {
                debug!("find_corrections: no correction for rare name {:?}", rare_name);
            }
        }
    }
    res
}

/// Rewrites the candidate names of the votes that are typos of a frequent name.
///
/// Returns the corrections that were applied.
pub fn normalize_names(votes: &mut [VoteRecord]) -> Vec<NameCorrection> {
    info!("Correcting typos in candidate names");
    let corrections = find_corrections(votes);
    let lookup: HashMap<&str, &str> = corrections
        .iter()
        .map(|c| (c.from.as_str(), c.to.as_str()))
        .collect();
    for v in votes.iter_mut() {
        if let Some(to) = lookup.get(v.candidate.as_str()) {
            v.candidate = to.to_string();
        }
    }
    for c in corrections.iter() {
        info!("Corrected {:?} -> {:?} ({} votes)", c.from, c.to, c.votes);
    }
    corrections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn votes_for(names: &[(&str, usize)]) -> Vec<VoteRecord> {
        let mut res = Vec::new();
        for (name, count) in names {
            for _ in 0..*count {
                res.push(VoteRecord {
                    id: res.len().to_string(),
                    timestamp: "2024-01-01 00:00:00".to_string(),
                    ip: "1.1.1.1".to_string(),
                    candidate: name.to_string(),
                });
            }
        }
        res
    }

    fn tally(votes: &[VoteRecord]) -> Vec<(String, u64)> {
        count_names(votes)
    }

    #[test]
    fn threshold() {
        assert_eq!(min_votes(0), 5);
        assert_eq!(min_votes(1000), 5);
        assert_eq!(min_votes(5999), 5);
        assert_eq!(min_votes(6000), 6);
        assert_eq!(min_votes(100_000), 100);
    }

    #[test]
    fn distance() {
        assert_eq!(bounded_distance("Ivanov", "Ivanov", 2), 0);
        assert_eq!(bounded_distance("Ivnaov", "Ivanov", 2), 1);
        assert_eq!(bounded_distance("Ivanv", "Ivanov", 2), 1);
        assert_eq!(bounded_distance("Ivanoff", "Ivanov", 2), 2);
        assert_eq!(bounded_distance("Petrov", "Ivanov", 2), 3);
        assert_eq!(bounded_distance("Iv", "Ivanov", 2), 3);
        assert_eq!(bounded_distance("", "", 2), 0);
        // Counted in characters, not bytes.
        assert_eq!(bounded_distance("Иванов", "Ивнаов", 2), 1);
    }

    #[test]
    fn merges_typo_into_common_name() {
        let mut votes = votes_for(&[("Ivanov", 950), ("Ivnaov", 2), ("Petrov", 48)]);
        assert_eq!(votes.len(), 1000);
        let corrections = normalize_names(&mut votes);
        assert_eq!(
            corrections,
            vec![NameCorrection {
                from: "Ivnaov".to_string(),
                to: "Ivanov".to_string(),
                votes: 2
            }]
        );
        assert_eq!(
            tally(&votes),
            vec![("Ivanov".to_string(), 952), ("Petrov".to_string(), 48)]
        );
    }

    #[test]
    fn first_common_name_wins() {
        // "Ivanoa" is one edit away from both common names.
        let mut votes = votes_for(&[("Ivanob", 10), ("Ivanov", 10), ("Ivanoa", 1)]);
        normalize_names(&mut votes);
        assert_eq!(
            tally(&votes),
            vec![("Ivanob".to_string(), 11), ("Ivanov".to_string(), 10)]
        );
    }

    #[test]
    fn rare_names_are_not_merged_together() {
        let mut votes = votes_for(&[("Sidorov", 20), ("Kim", 2), ("Kin", 3)]);
        let corrections = normalize_names(&mut votes);
        assert!(corrections.is_empty());
        assert_eq!(tally(&votes).len(), 3);
    }

    #[test]
    fn common_names_are_never_rewritten() {
        // Both names are close but both are frequent.
        let mut votes = votes_for(&[("Ivanov", 10), ("Ivanova", 10)]);
        assert!(normalize_names(&mut votes).is_empty());
    }

    #[test]
    fn is_idempotent() {
        let mut votes = votes_for(&[("Ivanov", 950), ("Ivnaov", 2), ("Petrov", 40), ("Xu", 3)]);
        normalize_names(&mut votes);
        let first = tally(&votes);
        let corrections = normalize_names(&mut votes);
        assert!(corrections.is_empty());
        assert_eq!(tally(&votes), first);
    }

    #[test]
    fn empty_names_are_ordinary_strings() {
        let mut votes = votes_for(&[("ab", 10), ("", 1)]);
        normalize_names(&mut votes);
        assert_eq!(tally(&votes), vec![("ab".to_string(), 11)]);
    }
}
