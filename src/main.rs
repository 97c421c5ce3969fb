use clap::Parser;
use log::error;
use snafu::ErrorCompat;

use survey_analysis::analysis::run_analysis;
use survey_analysis::args::Args;
use survey_analysis::logging::init_logging;

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        // Usage errors exit with 1, --help and --version exit normally.
        Err(e) if e.use_stderr() => {
            eprint!("{}", e);
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    init_logging(args.verbose);

    if let Err(e) = run_analysis(&args) {
        error!("{}", e);
        for cause in ErrorCompat::iter_chain(&e).skip(1) {
            error!("  caused by: {}", cause);
        }
        std::process::exit(1);
    }
}
