use clap::Parser;

use survey_stats::similarity::{Metric, DEFAULT_THRESHOLD};

/// Prints the share of respondents giving each answer in a survey export, after
/// weeding out incomplete and low-quality responses.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The tab-separated survey export, as produced by Qualtrics.
    #[clap(value_parser)]
    pub input: String,

    /// (file path, optional) A JSON file describing the layout of the export, the attention
    /// checks, the demographics and the questions to report. The built-in defaults describe
    /// the reference study.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (default all) The demographic to report on, as named in the configuration
    /// (graduates, experts, frequentUsers by default).
    #[clap(short, long, value_parser)]
    pub demographic: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the analysis will be written
    /// in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing a JSON summary. If provided, the computed summary
    /// must match it.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (default utf-16) The text encoding of the export when it does not start with a byte
    /// order mark. Overrides the configuration.
    #[clap(long, value_parser)]
    pub encoding: Option<String>,

    /// If passed as an argument, will turn on verbose logging.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}

/// Finds pairs of similar names in a list.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct NamePairsArgs {
    /// (file path) The list of names, one per line. Only the first comma-separated field is read.
    #[clap(value_parser)]
    pub input: String,

    /// (file path) Where to write the similar pairs, as `name,name,score` lines.
    #[clap(value_parser)]
    pub output: String,

    /// (default jaro-winkler) The similarity metric: jaro or jaro-winkler.
    #[clap(long, value_parser, default_value_t = Metric::JaroWinkler)]
    pub metric: Metric,

    /// (default 0.9) Pairs must score strictly above this similarity to be reported.
    #[clap(long, value_parser, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// If passed as an argument, will turn on verbose logging.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
