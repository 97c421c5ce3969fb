use clap::Parser;
use log::error;
use snafu::ErrorCompat;

use std::path::Path;

use survey_analysis::args::NamePairsArgs;
use survey_analysis::logging::init_logging;
use survey_stats::names::{read_names, write_pairs};
use survey_stats::similarity::scan_pairs;
use survey_stats::SurveyResult;

fn run(args: &NamePairsArgs) -> SurveyResult<()> {
    let names = read_names(Path::new(&args.input))?;
    let pairs = scan_pairs(&names, args.metric, args.threshold);
    write_pairs(Path::new(&args.output), &pairs, args.metric)
}

fn main() {
    let args = NamePairsArgs::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        error!("{}", e);
        for cause in ErrorCompat::iter_chain(&e).skip(1) {
            error!("  caused by: {}", cause);
        }
        std::process::exit(1);
    }
}
