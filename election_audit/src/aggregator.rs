use log::debug;
use std::collections::HashMap;

use crate::config::{CandidateAggregate, VoteRecord};

/// The votes grouped by candidate, in the order in which the candidates first appear.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Aggregates {
    candidates: Vec<CandidateAggregate>,
    index: HashMap<String, usize>,
}

impl Aggregates {
    pub fn get(&self, name: &str) -> Option<&CandidateAggregate> {
        self.index.get(name).map(|&idx| &self.candidates[idx])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CandidateAggregate> {
        self.candidates.iter()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    fn entry(&mut self, name: &str) -> &mut CandidateAggregate {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                self.candidates.push(CandidateAggregate::empty(name));
                self.index.insert(name.to_string(), self.candidates.len() - 1);
                self.candidates.len() - 1
            }
        };
        &mut self.candidates[idx]
    }
}

/// Rebuilds all the per-candidate statistics from the votes.
pub fn aggregate(votes: &[VoteRecord]) -> Aggregates {
    let mut res = Aggregates::default();
    for v in votes.iter() {
        res.entry(&v.candidate).push(v);
    }
    debug!(
        "aggregate: {} votes for {} candidates",
        votes.len(),
        res.len()
    );
    res
}
