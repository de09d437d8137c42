use clap::Parser;

/// This is a vote log auditing program: corrected tallies and a fraud report.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with the settings of the analysis.
    /// Options given on the command line take precedence over the file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The vote log, one vote per line. Overrides the inputFile of --config.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the analysis will be written
    /// in JSON format to the given location. With 'stdout', the console report goes to stderr so
    /// that the JSON can be piped. Overrides the outputFile of --config.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, votecheck will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (default 10) The number of candidates in the ranking by votes.
    #[clap(long, value_parser)]
    pub top: Option<usize>,

    /// (default 5) The number of candidates in each ranking of suspects.
    #[clap(long, value_parser)]
    pub suspects: Option<usize>,

    /// (default en) The language of the report: 'en' or 'ru'.
    #[clap(long, value_parser)]
    pub lang: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
