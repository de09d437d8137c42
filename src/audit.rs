use log::{debug, info, warn};

use election_audit::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::audit::config_reader::*;

pub mod config_reader;
mod io_votes;
pub mod report;

#[derive(Debug, Snafu)]
pub enum AuditError {
    #[snafu(display("Error opening vote log {path}"))]
    OpeningInput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("No vote found in {path}"))]
    NoVotes { path: String },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected a non-negative integer, found {value}"))]
    ParsingJsonNumber { value: String },
    #[snafu(display("Error writing summary to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Analysis failed: {source}"))]
    Analysis { source: AuditErrors },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type AuditResult<T> = Result<T, AuditError>;

/// The value of `--out` that prints the JSON summary instead of writing a file.
pub const STDOUT_TARGET: &str = "stdout";

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub contest: Option<String>,
    pub input: String,
    #[serde(rename = "totalVotes")]
    pub total_votes: usize,
}

fn score_js(score: f64) -> JSValue {
    // Infinite gaps have no JSON representation.
    if score.is_finite() {
        json!(score)
    } else {
        JSValue::Null
    }
}

pub fn build_summary_js(settings: &AuditSettings, analyzer: &Analyzer) -> JSValue {
    let c = OutputConfig {
        contest: settings.contest_name.clone(),
        input: io_votes::simplify_file_name(&settings.input_path),
        total_votes: analyzer.total_votes(),
    };
    let corrections: Vec<JSValue> = analyzer
        .corrections()
        .iter()
        .map(|nc| json!({"from": nc.from, "to": nc.to, "votes": nc.votes}))
        .collect();
    let top: Vec<JSValue> = analyzer
        .top_candidates(settings.top_candidates)
        .iter()
        .map(|(name, votes)| json!({"candidate": name, "votes": votes}))
        .collect();
    let by_ip: Vec<JSValue> = analyzer
        .most_suspicious_by_ip(settings.top_suspects)
        .iter()
        .map(|(name, ratio)| json!({"candidate": name, "uniqueIpRatio": score_js(*ratio)}))
        .collect();
    let by_time: Vec<JSValue> = analyzer
        .most_suspicious_by_time(settings.top_suspects)
        .iter()
        .map(|(name, gap)| json!({"candidate": name, "averageIntervalSecs": score_js(*gap)}))
        .collect();
    let findings: Vec<JSValue> = analyzer
        .fraud_findings()
        .iter()
        .map(|f| {
            let check = match f.check {
                FraudCheck::IpUniqueness => "ipUniqueness",
                FraudCheck::TimeGap => "timeGap",
            };
            json!({"candidate": f.candidate, "check": check, "reason": f.reason})
        })
        .collect();
    json!({
        "config": c,
        "results": {
            "corrections": corrections,
            "topCandidates": top,
            "suspiciousByIp": by_ip,
            "suspiciousByTime": by_time,
            "fraud": findings,
        }
    })
}

/// True when the JSON summary goes to stdout. The console report then goes to stderr.
fn summary_on_stdout(settings: &AuditSettings) -> bool {
    settings.output.as_deref() == Some(STDOUT_TARGET)
}

fn write_summary(output: &str, pretty_js: &str) -> AuditResult<()> {
    if output == STDOUT_TARGET {
        println!("{}", pretty_js);
        return Ok(());
    }
    info!("Writing summary to {:?}", output);
    fs::write(output, pretty_js).context(WritingOutputSnafu { path: output })
}

fn check_reference(reference_path: &str, pretty_js_stats: &str) -> AuditResult<()> {
    let summary_ref = read_summary(reference_path)?;
    debug!("reference summary: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        whatever!("Difference detected between calculated summary and reference summary")
    }
    Ok(())
}

/// Reads the vote log, runs the analysis and reports on it.
pub fn run_audit(settings: &AuditSettings) -> AuditResult<Analyzer> {
    info!("settings: {:?}", settings);
    let lines = io_votes::read_vote_lines(&settings.input_path)?;
    let analyzer = Analyzer::run(&lines).context(AnalysisSnafu {})?;
    if analyzer.total_votes() == 0 {
        return NoVotesSnafu {
            path: settings.input_path.clone(),
        }
        .fail();
    }

    let report_text = report::render_report(&analyzer, settings);
    if summary_on_stdout(settings) {
        eprint!("{}", report_text);
    } else {
        print!("{}", report_text);
    }

    if settings.output.is_some() || settings.reference.is_some() {
        let result_js = build_summary_js(settings, &analyzer);
        let pretty_js_stats =
            serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
        if let Some(output) = &settings.output {
            write_summary(output, &pretty_js_stats)?;
        }
        // The reference summary, if provided for comparison
        if let Some(reference_path) = &settings.reference {
            check_reference(reference_path, &pretty_js_stats)?;
        }
    }

    Ok(analyzer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Args;
    use crate::audit::report::Language;

    fn test_file(name: &str) -> String {
        format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    fn settings_for(input: &str) -> AuditSettings {
        AuditSettings::from_args(&Args {
            input: Some(test_file(input)),
            ..Args::default()
        })
        .unwrap()
    }

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("votecheck-{}-{}", std::process::id(), name))
            .display()
            .to_string()
    }

    #[test]
    fn report_moves_to_stderr_with_stdout_summary() {
        let mut settings = settings_for("votes_small.txt");
        assert!(!summary_on_stdout(&settings));
        settings.output = Some(temp_path("summary.json"));
        assert!(!summary_on_stdout(&settings));
        settings.output = Some(STDOUT_TARGET.to_string());
        assert!(summary_on_stdout(&settings));
        assert_eq!(run_audit(&settings).unwrap().total_votes(), 72);
    }

    #[test]
    fn small_log() {
        let analyzer = run_audit(&settings_for("votes_small.txt")).unwrap();
        assert_eq!(analyzer.total_votes(), 72);
        assert_eq!(analyzer.top_candidates(1), vec![("Ivanov".to_string(), 32)]);
        let f = analyzer.fraud_findings();
        assert_eq!(f.len(), 2);
        assert_eq!(f.get("Botov").unwrap().check, FraudCheck::TimeGap);
        assert_eq!(f.get("Stuffer").unwrap().check, FraudCheck::IpUniqueness);
    }

    #[test]
    fn summary_content() {
        let settings = settings_for("votes_small.txt");
        let analyzer = run_audit(&settings).unwrap();
        let js = build_summary_js(&settings, &analyzer);
        assert_eq!(js["config"]["totalVotes"], json!(72));
        assert_eq!(js["config"]["input"], json!("votes_small.txt"));
        let results = &js["results"];
        assert_eq!(results["corrections"].as_array().unwrap().len(), 2);
        assert_eq!(results["corrections"][0]["to"], json!("Ivanov"));
        assert_eq!(results["topCandidates"].as_array().unwrap().len(), 4);
        assert_eq!(results["suspiciousByIp"][0]["candidate"], json!("Stuffer"));
        assert_eq!(results["suspiciousByTime"][0]["averageIntervalSecs"], json!(20.0));
        assert_eq!(results["fraud"][1]["check"], json!("timeGap"));
    }

    #[test]
    fn infinite_gap_is_null() {
        let settings = settings_for("votes_same_time.txt");
        let analyzer = run_audit(&settings).unwrap();
        let js = build_summary_js(&settings, &analyzer);
        assert_eq!(
            js["results"]["suspiciousByTime"][0]["averageIntervalSecs"],
            JSValue::Null
        );
    }

    #[test]
    fn reference_round_trip() {
        let out = temp_path("summary.json");
        let mut settings = settings_for("votes_small.txt");
        settings.output = Some(out.clone());
        run_audit(&settings).unwrap();

        settings.output = None;
        settings.reference = Some(out.clone());
        assert!(run_audit(&settings).is_ok());
        let _ = fs::remove_file(out);
    }

    #[test]
    fn reference_mismatch() {
        let mut settings = settings_for("votes_small.txt");
        settings.reference = Some(test_file("reference_mismatch.json"));
        assert!(matches!(
            run_audit(&settings),
            Err(AuditError::Whatever { .. })
        ));
    }

    #[test]
    fn missing_input() {
        let res = run_audit(&settings_for("does_not_exist.txt"));
        assert!(matches!(res, Err(AuditError::OpeningInput { .. })));
    }

    #[test]
    fn no_votes() {
        let res = run_audit(&settings_for("no_votes.txt"));
        assert!(matches!(res, Err(AuditError::NoVotes { .. })));
    }

    #[test]
    fn bad_timestamp() {
        let res = run_audit(&settings_for("votes_bad_time.txt"));
        match res {
            Err(AuditError::Analysis {
                source: AuditErrors::InvalidTimestamp { candidate, .. },
            }) => assert_eq!(candidate, "Botov"),
            x => panic!("unexpected result {:?}", x.map(|a| a.total_votes())),
        }
    }

    #[test]
    fn config_file() {
        let settings = AuditSettings::from_args(&Args {
            config: Some(test_file("audit_config.json")),
            ..Args::default()
        })
        .unwrap();
        assert_eq!(settings.input_path, test_file("votes_small.txt"));
        assert_eq!(settings.contest_name, Some("Test contest".to_string()));
        assert_eq!(settings.top_candidates, 3);
        assert_eq!(settings.top_suspects, 2);
        assert_eq!(settings.language, Language::Russian);
        let analyzer = run_audit(&settings).unwrap();
        assert_eq!(analyzer.total_votes(), 72);
    }
}
