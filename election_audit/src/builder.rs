pub use crate::config::*;
use crate::{parser, Analyzer};

/// A builder for collecting votes before running the analysis.
///
/// ```
/// use election_audit::builder::Builder;
/// # use election_audit::AuditErrors;
///
/// let mut builder = Builder::new();
/// builder.add_line("id: 1, time: 2024-05-01 10:00:00, ip: 10.0.0.1, candidate: Anna");
/// builder.add_vote(2, "2024-05-01 10:01:00", "10.0.0.2", "Bob");
///
/// let analyzer = builder.analyze()?;
/// assert_eq!(analyzer.total_votes(), 2);
///
/// # Ok::<(), AuditErrors>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    pub(crate) _votes: Vec<VoteRecord>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder { _votes: Vec::new() }
    }

    /// Adds the vote described by a line of the log.
    ///
    /// Returns false (and adds nothing) if the line does not describe a vote.
    pub fn add_line(&mut self, line: &str) -> bool {
        match parser::parse_line(line) {
            Some(vote) => {
                self._votes.push(vote);
                true
            }
            None => false,
        }
    }

    /// Adds a vote from its fields. The fields are not validated.
    pub fn add_vote(&mut self, id: u64, timestamp: &str, ip: &str, candidate: &str) {
        self.add_record(VoteRecord {
            id: id.to_string(),
            timestamp: timestamp.to_string(),
            ip: ip.to_string(),
            candidate: candidate.to_string(),
        })
    }

    pub fn add_record(&mut self, vote: VoteRecord) {
        self._votes.push(vote);
    }

    pub fn len(&self) -> usize {
        self._votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self._votes.is_empty()
    }

    /// Runs the analysis on the votes added so far.
    pub fn analyze(self) -> Result<Analyzer, AuditErrors> {
        Analyzer::from_votes(self._votes)
    }
}
