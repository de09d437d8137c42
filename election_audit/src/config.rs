// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One vote, as read from a line of the vote log.
///
/// All the fields are kept as text. The id is never interpreted, so ids of
/// any length are accepted. The timestamp and the IP are not validated when
/// parsing.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct VoteRecord {
    pub id: String,
    pub timestamp: String,
    pub ip: String,
    /// The only field rewritten after parsing, when the name gets corrected.
    pub candidate: String,
}

// ******** Output data structures *********

/// All the votes of a single candidate, after name correction.
///
/// Invariant: `vote_count == ip_list.len() == time_list.len()`.
#[derive(PartialEq, Debug, Clone)]
pub struct CandidateAggregate {
    pub name: String,
    pub vote_count: u64,
    pub ip_list: Vec<String>,
    pub time_list: Vec<String>,
}

impl CandidateAggregate {
    pub(crate) fn empty(name: &str) -> CandidateAggregate {
        CandidateAggregate {
            name: name.to_string(),
            vote_count: 0,
            ip_list: Vec::new(),
            time_list: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, vote: &VoteRecord) {
        self.vote_count += 1;
        self.ip_list.push(vote.ip.clone());
        self.time_list.push(vote.timestamp.clone());
    }
}

/// A candidate name that was rewritten into another one.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct NameCorrection {
    pub from: String,
    pub to: String,
    /// Number of raw votes carried over to the corrected name.
    pub votes: u64,
}

/// The heuristic that flagged a candidate.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum FraudCheck {
    IpUniqueness,
    TimeGap,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FraudFinding {
    pub candidate: String,
    pub reason: String,
    pub check: FraudCheck,
}

/// Flagged candidates with the reason of the flag.
///
/// A candidate appears at most once. Flagging a candidate again replaces the
/// reason but keeps the position of the first flag.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct FraudFindings {
    entries: Vec<FraudFinding>,
}

impl FraudFindings {
    pub fn new() -> FraudFindings {
        FraudFindings::default()
    }

    pub fn flag(&mut self, candidate: &str, check: FraudCheck, reason: String) {
        if let Some(f) = self.entries.iter_mut().find(|f| f.candidate == candidate) {
            f.reason = reason;
            f.check = check;
        } else {
            self.entries.push(FraudFinding {
                candidate: candidate.to_string(),
                reason,
                check,
            });
        }
    }

    pub fn reason(&self, candidate: &str) -> Option<&str> {
        self.get(candidate).map(|f| f.reason.as_str())
    }

    pub fn get(&self, candidate: &str) -> Option<&FraudFinding> {
        self.entries.iter().find(|f| f.candidate == candidate)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FraudFinding> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Errors that prevent the analysis from completing successfully.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum AuditErrors {
    /// A timestamp of this candidate could not be read as a date and time.
    InvalidTimestamp { candidate: String, value: String },
}

impl Error for AuditErrors {}

impl Display for AuditErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditErrors::InvalidTimestamp { candidate, value } => write!(
                f,
                "AuditError: invalid timestamp {:?} in the votes of {}",
                value, candidate
            ),
        }
    }
}
