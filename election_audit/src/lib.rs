pub mod aggregator;
pub mod builder;
pub mod classifier;
mod config;
pub mod manual;
pub mod normalizer;
pub mod parser;
pub mod scorer;

use log::info;

pub use crate::aggregator::Aggregates;
pub use crate::config::*;

/// The outcome of the analysis of one vote log.
///
/// All the stages run once, in order, when the analyzer is built:
/// parsing, name correction, aggregation, scoring and classification.
/// The rankings are computed on demand and do not change the state.
#[derive(PartialEq, Debug, Clone)]
pub struct Analyzer {
    votes: Vec<VoteRecord>,
    corrections: Vec<NameCorrection>,
    aggregates: Aggregates,
    ip_ratios: Vec<(String, f64)>,
    time_gaps: Vec<(String, f64)>,
    findings: FraudFindings,
}

impl Analyzer {
    /// Runs the analysis on the lines of a vote log.
    ///
    /// Lines that do not describe a vote are ignored.
    pub fn run<I, S>(lines: I) -> Result<Analyzer, AuditErrors>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        info!("Loading data");
        let votes = parser::parse_lines(lines);
        Analyzer::from_votes(votes)
    }

    /// Runs the analysis on votes that are already parsed.
    pub fn from_votes(mut votes: Vec<VoteRecord>) -> Result<Analyzer, AuditErrors> {
        let corrections = normalizer::normalize_names(&mut votes);
        let aggregates = aggregator::aggregate(&votes);
        let ip_ratios = scorer::ip_ratios(&aggregates);
        let time_gaps = scorer::time_gaps(&aggregates)?;
        info!("Checking {} candidates for fraud", aggregates.len());
        let findings = classifier::classify(&ip_ratios, &time_gaps);
        Ok(Analyzer {
            votes,
            corrections,
            aggregates,
            ip_ratios,
            time_gaps,
            findings,
        })
    }

    /// The candidates with the most votes, in decreasing order.
    pub fn top_candidates(&self, limit: usize) -> Vec<(String, u64)> {
        let mut res: Vec<(String, u64)> = self
            .aggregates
            .iter()
            .map(|c| (c.name.clone(), c.vote_count))
            .collect();
        res.sort_by(|a, b| b.1.cmp(&a.1));
        res.truncate(limit);
        res
    }

    /// The candidates with the lowest fraction of distinct IPs.
    pub fn most_suspicious_by_ip(&self, limit: usize) -> Vec<(String, f64)> {
        let mut res = classifier::rank_ascending(&self.ip_ratios);
        res.truncate(limit);
        res
    }

    /// The candidates with the shortest average interval between votes.
    ///
    /// Candidates with too few votes to be scored are not included.
    pub fn most_suspicious_by_time(&self, limit: usize) -> Vec<(String, f64)> {
        let mut res = classifier::rank_ascending(&self.time_gaps);
        res.truncate(limit);
        res
    }

    pub fn fraud_findings(&self) -> &FraudFindings {
        &self.findings
    }

    /// The votes, with corrected candidate names.
    pub fn votes(&self) -> &[VoteRecord] {
        &self.votes
    }

    pub fn total_votes(&self) -> usize {
        self.votes.len()
    }

    pub fn aggregates(&self) -> &Aggregates {
        &self.aggregates
    }

    pub fn corrections(&self) -> &[NameCorrection] {
        &self.corrections
    }
}
