use log::{debug, info};

use crate::config::{FraudCheck, FraudFindings};

/// Below this fraction of distinct IPs, a candidate is flagged.
pub const IP_RATIO_THRESHOLD: f64 = 0.3;
/// Below this average interval between votes (seconds), a candidate is flagged.
pub const TIME_GAP_THRESHOLD_SECS: f64 = 60.0;
/// Only the most suspicious candidates of each ranking are checked.
pub const SUSPECTS_CONSIDERED: usize = 3;

/// Rounds to the given number of decimals, away from zero on ties.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Sorts the scores in increasing order. Ties keep their original order.
pub fn rank_ascending(scores: &[(String, f64)]) -> Vec<(String, f64)> {
    let mut res = scores.to_vec();
    res.sort_by(|a, b| a.1.total_cmp(&b.1));
    res
}

pub fn ip_reason(ratio: f64) -> String {
    format!("too few unique IPs: {}%", round_to(ratio * 100.0, 2))
}

pub fn time_reason(avg_gap: f64) -> String {
    format!("votes too fast: average interval {} sec", round_to(avg_gap, 1))
}

/// Flags the candidates among the lowest IP ratios.
pub fn check_ip_fraud(ip_ratios: &[(String, f64)], findings: &mut FraudFindings) {
    for (candidate, ratio) in rank_ascending(ip_ratios)
        .iter()
        .take(SUSPECTS_CONSIDERED)
    {
        debug!("check_ip_fraud: {}: ratio {}", candidate, ratio);
        if *ratio < IP_RATIO_THRESHOLD {
            findings.flag(candidate, FraudCheck::IpUniqueness, ip_reason(*ratio));
        }
    }
}

/// Flags the candidates among the lowest average time gaps.
pub fn check_time_fraud(time_gaps: &[(String, f64)], findings: &mut FraudFindings) {
    for (candidate, avg_gap) in rank_ascending(time_gaps)
        .iter()
        .take(SUSPECTS_CONSIDERED)
    {
        debug!("check_time_fraud: {}: average gap {}", candidate, avg_gap);
        if *avg_gap < TIME_GAP_THRESHOLD_SECS {
            findings.flag(candidate, FraudCheck::TimeGap, time_reason(*avg_gap));
        }
    }
}

/// Runs both checks. The time check runs last and replaces the reason of a
/// candidate already flagged by the IP check.
pub fn classify(ip_ratios: &[(String, f64)], time_gaps: &[(String, f64)]) -> FraudFindings {
    let mut findings = FraudFindings::new();
    check_ip_fraud(ip_ratios, &mut findings);
    check_time_fraud(time_gaps, &mut findings);
    for f in findings.iter() {
        info!("Flagged {}: {}", f.candidate, f.reason);
    }
    findings
}
