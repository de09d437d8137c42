// Console presentation of the analysis.

use crate::audit::config_reader::AuditSettings;
use crate::audit::*;

use election_audit::classifier::round_to;

/// The language of the labels of the report.
///
/// Fraud reasons are printed as produced by the analysis.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Language {
    English,
    Russian,
}

impl Language {
    pub fn from_code(code: &str) -> AuditResult<Language> {
        match code.to_lowercase().as_str() {
            "en" => Ok(Language::English),
            "ru" => Ok(Language::Russian),
            x => {
                whatever!("Unsupported language {:?}: expected 'en' or 'ru'", x)
            }
        }
    }

    fn top_header(self, n: usize) -> String {
        match self {
            Language::English => format!("Top {} candidates:", n),
            Language::Russian => format!("Топ-{} участников:", n),
        }
    }

    fn top_line(self, name: &str, votes: u64) -> String {
        match self {
            Language::English => format!("{}: {} votes", name, votes),
            Language::Russian => format!("{}: {} голосов", name, votes),
        }
    }

    fn ip_header(self, n: usize) -> String {
        match self {
            Language::English => format!("Top {} suspicious by IP:", n),
            Language::Russian => format!("Топ-{} подозрительных по IP:", n),
        }
    }

    fn ip_line(self, name: &str, ratio: f64) -> String {
        let pct = round_to(ratio * 100.0, 2);
        match self {
            Language::English => format!("{}: {}% unique IPs", name, pct),
            Language::Russian => format!("{}: {}% уникальных IP", name, pct),
        }
    }

    fn time_header(self, n: usize) -> String {
        match self {
            Language::English => format!("Top {} suspicious by time:", n),
            Language::Russian => format!("Топ-{} подозрительных по времени:", n),
        }
    }

    fn time_line(self, name: &str, avg_gap: f64) -> String {
        let gap = round_to(avg_gap, 1);
        match self {
            Language::English => format!("{}: average interval {} sec", name, gap),
            Language::Russian => format!("{}: средний интервал {} сек", name, gap),
        }
    }

    fn fraud_header(self) -> &'static str {
        match self {
            Language::English => "Detected fraud:",
            Language::Russian => "Выявленные мошенники:",
        }
    }

    fn no_fraud(self) -> &'static str {
        match self {
            Language::English => "No fraud found",
            Language::Russian => "Мошенники не найдены",
        }
    }
}

/// Renders the rankings and the fraud report as text.
pub fn render_report(analyzer: &Analyzer, settings: &AuditSettings) -> String {
    let lang = settings.language;
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", lang.top_header(settings.top_candidates)));
    for (i, (name, votes)) in analyzer
        .top_candidates(settings.top_candidates)
        .iter()
        .enumerate()
    {
        out.push_str(&format!("{}. {}\n", i + 1, lang.top_line(name, *votes)));
    }

    out.push_str(&format!("\n{}\n", lang.ip_header(settings.top_suspects)));
    for (i, (name, ratio)) in analyzer
        .most_suspicious_by_ip(settings.top_suspects)
        .iter()
        .enumerate()
    {
        out.push_str(&format!("{}. {}\n", i + 1, lang.ip_line(name, *ratio)));
    }

    out.push_str(&format!("\n{}\n", lang.time_header(settings.top_suspects)));
    for (i, (name, gap)) in analyzer
        .most_suspicious_by_time(settings.top_suspects)
        .iter()
        .enumerate()
    {
        out.push_str(&format!("{}. {}\n", i + 1, lang.time_line(name, *gap)));
    }

    out.push_str(&format!("\n{}\n", lang.fraud_header()));
    let findings = analyzer.fraud_findings();
    if findings.is_empty() {
        out.push_str(&format!("{}\n", lang.no_fraud()));
    } else {
        for f in findings.iter() {
            out.push_str(&format!("{}: {}\n", f.candidate, f.reason));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use election_audit::builder::Builder;

    fn settings(language: Language) -> AuditSettings {
        AuditSettings {
            contest_name: None,
            input_path: "votes.txt".to_string(),
            output: None,
            reference: None,
            top_candidates: 10,
            top_suspects: 5,
            language,
        }
    }

    fn sample() -> Analyzer {
        let mut b = Builder::new();
        for i in 0..12 {
            b.add_vote(
                i,
                &format!("2024-05-01 10:00:{:02}", i * 3),
                "10.0.0.1",
                "Botov",
            );
        }
        for i in 0..6 {
            b.add_vote(
                100 + i,
                &format!("2024-05-01 1{}:00:00", i),
                &format!("10.0.1.{}", i),
                "Ivanov",
            );
        }
        b.analyze().unwrap()
    }

    #[test]
    fn language_codes() {
        assert_eq!(Language::from_code("en").unwrap(), Language::English);
        assert_eq!(Language::from_code("RU").unwrap(), Language::Russian);
        assert!(Language::from_code("de").is_err());
    }

    #[test]
    fn english_report() {
        let text = render_report(&sample(), &settings(Language::English));
        assert!(text.contains("Top 10 candidates:"));
        assert!(text.contains("1. Botov: 12 votes"));
        assert!(text.contains("2. Ivanov: 6 votes"));
        assert!(text.contains("1. Botov: 8.33% unique IPs"));
        assert!(text.contains("1. Botov: average interval 3 sec"));
        assert!(text.contains("Botov: votes too fast: average interval 3 sec"));
        assert!(!text.contains("No fraud found"));
    }

    #[test]
    fn russian_report() {
        let text = render_report(&sample(), &settings(Language::Russian));
        assert!(text.contains("Топ-10 участников:"));
        assert!(text.contains("1. Botov: 12 голосов"));
        assert!(text.contains("Выявленные мошенники:"));
    }

    #[test]
    fn no_fraud() {
        let mut b = Builder::new();
        b.add_vote(1, "2024-05-01 10:00:00", "10.0.0.1", "Ivanov");
        let a = b.analyze().unwrap();
        let text = render_report(&a, &settings(Language::English));
        assert!(text.contains("No fraud found"));
        // Ivanov has a single vote from a single IP.
        assert!(text.contains("1. Ivanov: 100% unique IPs"));
    }
}
