// Primitives for reading the vote log.

use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;

use crate::config::VoteRecord;

lazy_static! {
    // ASCII digits only: `\d` would also admit other scripts.
    static ref VOTE_LINE: Regex =
        Regex::new(r"id: ([0-9]+), time: ([0-9\-: ]+), ip: ([0-9.]+), candidate: (.+)").unwrap();
}

/// Reads a single line of the log.
///
/// Returns None if the line does not describe a vote.
pub fn parse_line(line: &str) -> Option<VoteRecord> {
    let caps = VOTE_LINE.captures(line)?;
    Some(VoteRecord {
        id: caps[1].trim().to_string(),
        timestamp: caps[2].trim().to_string(),
        ip: caps[3].trim().to_string(),
        candidate: caps[4].trim().to_string(),
    })
}

/// Reads all the votes, in the order of the lines. Other lines are dropped.
pub fn parse_lines<I, S>(lines: I) -> Vec<VoteRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut res: Vec<VoteRecord> = Vec::new();
    for (idx, line) in lines.into_iter().enumerate() {
        match parse_line(line.as_ref()) {
            Some(vote) => res.push(vote),
            None => {
                debug!("parse_lines: skipping line {}: {:?}", idx + 1, line.as_ref());
            }
        }
    }
    info!("Read {} votes", res.len());
    res
}
