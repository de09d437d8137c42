use crate::args::Args;
use crate::audit::report::Language;
use crate::audit::*;

use std::path::{Path, PathBuf};

pub const DEFAULT_TOP_CANDIDATES: usize = 10;
pub const DEFAULT_TOP_SUSPECTS: usize = 5;

/// The content of the JSON configuration file. All the fields are optional.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    #[serde(rename = "contestName")]
    pub contest_name: Option<String>,
    #[serde(rename = "inputFile")]
    pub input_file: Option<String>,
    #[serde(rename = "outputFile")]
    pub output_file: Option<String>,
    #[serde(rename = "topCandidates")]
    pub top_candidates: Option<JSValue>,
    #[serde(rename = "topSuspects")]
    pub top_suspects: Option<JSValue>,
    pub language: Option<String>,
}

/// The settings of one run, after merging the command line and the configuration file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AuditSettings {
    pub contest_name: Option<String>,
    pub input_path: String,
    pub output: Option<String>,
    pub reference: Option<String>,
    pub top_candidates: usize,
    pub top_suspects: usize,
    pub language: Language,
}

impl AuditSettings {
    pub fn from_args(args: &Args) -> AuditResult<AuditSettings> {
        let (config, config_dir) = match &args.config {
            Some(config_path) => {
                let config = read_config(config_path)?;
                let dir = Path::new(config_path)
                    .parent()
                    .map(|p| p.to_path_buf())
                    .unwrap_or_default();
                (Some(config), dir)
            }
            None => (None, PathBuf::new()),
        };

        let input_path = match (&args.input, config.as_ref().and_then(|c| c.input_file.clone())) {
            (Some(p), _) => p.clone(),
            (None, Some(p)) => config_dir.join(p).display().to_string(),
            (None, None) => {
                whatever!("No vote log given: use --input or the inputFile option")
            }
        };

        let top_candidates = match (args.top, config.as_ref()) {
            (Some(x), _) => x,
            (None, Some(c)) if c.top_candidates.is_some() => read_js_int(&c.top_candidates)?,
            _ => DEFAULT_TOP_CANDIDATES,
        };
        let top_suspects = match (args.suspects, config.as_ref()) {
            (Some(x), _) => x,
            (None, Some(c)) if c.top_suspects.is_some() => read_js_int(&c.top_suspects)?,
            _ => DEFAULT_TOP_SUSPECTS,
        };

        let lang = args
            .lang
            .clone()
            .or_else(|| config.as_ref().and_then(|c| c.language.clone()));
        let language = match lang {
            Some(l) => Language::from_code(&l)?,
            None => Language::English,
        };

        Ok(AuditSettings {
            contest_name: config.as_ref().and_then(|c| c.contest_name.clone()),
            input_path,
            output: args
                .out
                .clone()
                .or_else(|| config.as_ref().and_then(|c| c.output_file.clone())),
            reference: args.reference.clone(),
            top_candidates,
            top_suspects,
            language,
        })
    }
}

pub fn read_config(path: &str) -> AuditResult<AuditConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: AuditConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> AuditResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

fn read_js_int(x: &Option<JSValue>) -> AuditResult<usize> {
    match x {
        Some(JSValue::Number(n)) => n.as_u64().map(|x| x as usize).context(ParsingJsonNumberSnafu {
            value: n.to_string(),
        }),
        Some(JSValue::String(s)) => s
            .parse::<usize>()
            .ok()
            .context(ParsingJsonNumberSnafu { value: s.clone() }),
        x => None.context(ParsingJsonNumberSnafu {
            value: format!("{:?}", x),
        }),
    }
}
