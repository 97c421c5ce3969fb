// Reading name lists and writing the similar pairs found in them.

use log::info;
use snafu::prelude::*;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::*;
use crate::similarity::{Metric, NamePair};

/// Reads the first comma-separated field of every line. Duplicates are kept.
pub fn read_names(path: &Path) -> SurveyResult<Vec<String>> {
    let p = path.display().to_string();
    info!("Reading names from '{}'.", p);
    let file = File::open(path).context(OpeningFileSnafu { path: p })?;
    parse_names(file)
}

pub fn parse_names<R: std::io::Read>(rdr: R) -> SurveyResult<Vec<String>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(rdr);
    let mut res: Vec<String> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx as u64 + 1;
        let line = line_r.context(TsvLineParseSnafu { lineno })?;
        if let Some(name) = line.get(0) {
            res.push(name.to_string());
        }
    }
    info!("Read {} names.", res.len());
    Ok(res)
}

/// Writes one `first,second,score` line per pair.
///
/// The score is computed again with the metric rather than taken from the pair.
pub fn write_pairs(path: &Path, pairs: &[NamePair], metric: Metric) -> SurveyResult<()> {
    let p = path.display().to_string();
    let file = File::create(path).context(WritingFileSnafu { path: p.clone() })?;
    let mut out = BufWriter::new(file);
    format_pairs(&mut out, pairs, metric).context(WritingFileSnafu { path: p.clone() })?;
    out.flush().context(WritingFileSnafu { path: p.clone() })?;
    info!("Wrote {} pairs to '{}'.", pairs.len(), p);
    Ok(())
}

pub fn format_pairs<W: Write>(
    out: &mut W,
    pairs: &[NamePair],
    metric: Metric,
) -> std::io::Result<()> {
    for pair in pairs {
        let score = metric.score(&pair.first, &pair.second);
        writeln!(out, "{},{},{:?}", pair.first, pair.second, score)?;
    }
    Ok(())
}
