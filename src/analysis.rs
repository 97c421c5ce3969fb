use log::{debug, info, warn};
use serde_json::json;
use serde_json::Value as JSValue;
use snafu::prelude::*;
use text_diff::print_diff;

use std::fs;
use std::path::Path;
use std::sync::Arc;

pub use survey_stats::*;

use crate::args::Args;

pub mod config_reader;
pub mod report;

use crate::analysis::config_reader::*;
use crate::analysis::report::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AnalysisError {
    #[snafu(display("Error loading the survey"))]
    Survey { source: SurveyError },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the summary"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error writing to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

const ALL: &str = "all";

fn select_demographic(
    population: &Collection,
    name: &str,
    demographics: &[DemographicConfig],
) -> AnalysisResult<Collection> {
    // Sizes of all the known demographics, for the record.
    for d in demographics.iter() {
        let c = population
            .select_within(&d.question, &d.allowed)
            .context(SurveySnafu {})?;
        info!(
            "Demographic {}: {} responses ({:.2}%).",
            d.name,
            c.len(),
            share(c.len(), population.len())
        );
    }
    if name == ALL {
        return Ok(population.clone());
    }
    match demographics.iter().find(|d| d.name == name) {
        Some(d) => population
            .select_within(&d.question, &d.allowed)
            .context(SurveySnafu {}),
        None => {
            let known: Vec<&str> = demographics.iter().map(|d| d.name.as_str()).collect();
            whatever!(
                "Unknown demographic {:?} (known: {}, {})",
                name,
                ALL,
                known.join(", ")
            )
        }
    }
}

fn build_summary_js(
    input: &str,
    demographic: &str,
    pruning: &PruneReport,
    size: usize,
    stats: &[BlockStats],
) -> JSValue {
    json!({
        "input": input,
        "pruning": {
            "initial": pruning.initial,
            "finished": pruning.finished,
            "attentive": pruning.attentive,
        },
        "demographic": {
            "name": demographic,
            "size": size,
        },
        "results": stats,
    })
}

fn write_summary(out: &str, pretty_js: &str) -> AnalysisResult<()> {
    if out == "stdout" {
        println!("{}", pretty_js);
        return Ok(());
    }
    fs::write(out, pretty_js).context(WritingOutputSnafu { path: out })?;
    info!("Summary written to {}", out);
    Ok(())
}

fn check_reference(reference_path: &str, pretty_js: &str) -> AnalysisResult<()> {
    let contents =
        fs::read_to_string(reference_path).context(OpeningJsonSnafu { path: reference_path })?;
    let reference: JSValue =
        serde_json::from_str(&contents).context(ParsingJsonSnafu { path: reference_path })?;
    let pretty_reference =
        serde_json::to_string_pretty(&reference).context(SerializingJsonSnafu {})?;
    if pretty_reference != pretty_js {
        warn!("Found differences with the reference summary");
        print_diff(pretty_reference.as_str(), pretty_js, "\n");
        whatever!("Difference detected between calculated summary and reference summary")
    }
    info!("Summary matches the reference {}", reference_path);
    Ok(())
}

/// Loads, prunes and tabulates a survey export, printing the report to stdout.
pub fn run_analysis(args: &Args) -> AnalysisResult<()> {
    let config = match &args.config {
        Some(p) => read_config(p)?,
        None => AnalysisConfig::default(),
    };

    let mut options = config.read_options()?;
    if let Some(label) = &args.encoding {
        options = options
            .with_encoding_label(label)
            .context(SurveySnafu {})?;
    }
    debug!("run_analysis: options: {:?}", options);

    let schema = Arc::new(config.schema());
    let responses =
        read_survey(Path::new(&args.input), schema, &options).context(SurveySnafu {})?;

    let (population, pruning) =
        prune(&responses, &config.prune_rules()).context(SurveySnafu {})?;

    let demographic = args.demographic.as_deref().unwrap_or(ALL);
    let selected = select_demographic(&population, demographic, &config.demographics())?;

    let stats = tabulate(&selected, &config.blocks()).context(SurveySnafu {})?;
    let stdout = std::io::stdout();
    render(&mut stdout.lock(), &stats).context(WritingOutputSnafu { path: "stdout" })?;

    if args.out.is_none() && args.reference.is_none() {
        return Ok(());
    }

    let summary_js = build_summary_js(&args.input, demographic, &pruning, selected.len(), &stats);
    let pretty_js = serde_json::to_string_pretty(&summary_js).context(SerializingJsonSnafu {})?;
    if let Some(out) = &args.out {
        write_summary(out, &pretty_js)?;
    }
    if let Some(reference_path) = &args.reference {
        check_reference(reference_path, &pretty_js)?;
    }
    Ok(())
}
