use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use std::collections::HashSet;

use crate::aggregator::Aggregates;
use crate::config::AuditErrors;

/// Candidates with fewer votes get no time gap score.
pub const MIN_VOTES_FOR_TIME_GAP: u64 = 10;

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Reads a timestamp of the log. A date alone is read as midnight.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// The fraction of distinct IPs among the votes of each candidate.
pub fn ip_ratios(aggregates: &Aggregates) -> Vec<(String, f64)> {
    aggregates
        .iter()
        .map(|c| {
            let unique: HashSet<&String> = c.ip_list.iter().collect();
            let ratio = unique.len() as f64 / c.vote_count as f64;
            debug!(
                "ip_ratios: {}: {} distinct IPs for {} votes",
                c.name,
                unique.len(),
                c.vote_count
            );
            (c.name.clone(), ratio)
        })
        .collect()
}

/// Average of the strictly positive gaps between the sorted times, in seconds.
///
/// Infinite if no gap is positive.
pub fn average_positive_gap(times: &[NaiveDateTime]) -> f64 {
    let mut sorted = times.to_vec();
    sorted.sort();
    let gaps: Vec<f64> = sorted
        .windows(2)
        .map(|w| (w[1] - w[0]).num_milliseconds() as f64 / 1000.0)
        .filter(|g| *g > 0.0)
        .collect();
    if gaps.is_empty() {
        f64::INFINITY
    } else {
        gaps.iter().sum::<f64>() / gaps.len() as f64
    }
}

/// The average time between consecutive votes of each candidate with
/// at least `MIN_VOTES_FOR_TIME_GAP` votes.
///
/// All the timestamps of a scored candidate must be readable.
pub fn time_gaps(aggregates: &Aggregates) -> Result<Vec<(String, f64)>, AuditErrors> {
    let mut res: Vec<(String, f64)> = Vec::new();
    for c in aggregates.iter() {
        if c.vote_count < MIN_VOTES_FOR_TIME_GAP {
            continue;
        }
        let mut times: Vec<NaiveDateTime> = Vec::with_capacity(c.time_list.len());
        for t in c.time_list.iter() {
            let parsed = parse_timestamp(t).ok_or_else(|| AuditErrors::InvalidTimestamp {
                candidate: c.name.clone(),
                value: t.clone(),
            })?;
            times.push(parsed);
        }
        let avg = average_positive_gap(&times);
        debug!("time_gaps: {}: average gap {} sec", c.name, avg);
        res.push((c.name.clone(), avg));
    }
    Ok(res)
}
