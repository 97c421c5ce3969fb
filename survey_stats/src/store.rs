// Loading of tab-separated survey exports.

use encoding_rs::Encoding;
use log::{debug, info};
use snafu::prelude::*;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::collection::Collection;
use crate::errors::*;
use crate::record::*;

/// How a survey export is laid out on disk.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    pub delimiter: u8,
    /// Leading rows holding question metadata rather than actual responses.
    pub metadata_lines: usize,
    /// Used when the file does not start with a byte order mark.
    pub encoding: &'static Encoding,
}

impl ReadOptions {
    pub fn with_encoding_label(mut self, label: &str) -> SurveyResult<ReadOptions> {
        self.encoding = Encoding::for_label(label.as_bytes())
            .context(UnknownEncodingSnafu { label })?;
        Ok(self)
    }
}

impl Default for ReadOptions {
    /// Qualtrics exports: UTF-16 TSV with three metadata rows.
    fn default() -> Self {
        ReadOptions {
            delimiter: b'\t',
            metadata_lines: 3,
            encoding: encoding_rs::UTF_16LE,
        }
    }
}

/// Decodes raw bytes. A byte order mark takes precedence over the default encoding.
pub fn decode(bytes: &[u8], default: &'static Encoding, path: &str) -> SurveyResult<String> {
    let (encoding, bom_len) = Encoding::for_bom(bytes).unwrap_or((default, 0));
    debug!("decode: {} as {} (bom: {})", path, encoding.name(), bom_len > 0);
    encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
        .map(|s| s.into_owned())
        .context(DecodingSnafu {
            path,
            encoding: encoding.name(),
        })
}

/// Reads the survey export at the given path.
pub fn read_survey(
    path: &Path,
    schema: Arc<Schema>,
    options: &ReadOptions,
) -> SurveyResult<Collection> {
    let p = path.display().to_string();
    info!("Attempting to open file '{}'.", p);
    let bytes = fs::read(path).context(OpeningFileSnafu { path: p.clone() })?;
    let content = decode(&bytes, options.encoding, &p)?;
    parse_survey(&content, schema, options)
}

/// Parses decoded survey data.
///
/// Every field that looks like a list of codes becomes a choice set, all the
/// others stay text.
pub fn parse_survey(
    content: &str,
    schema: Arc<Schema>,
    options: &ReadOptions,
) -> SurveyResult<Collection> {
    let rdr = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records: Vec<Record> = Vec::new();
    for (idx, row_r) in rdr.into_records().enumerate() {
        let lineno = idx as u64 + 1;
        let row = row_r.context(TsvLineParseSnafu { lineno })?;
        let lineno = row.position().map(|p| p.line()).unwrap_or(lineno);
        if idx < options.metadata_lines {
            continue;
        }
        ensure!(
            row.len() == schema.len(),
            RowWidthSnafu {
                lineno,
                expected: schema.len(),
                found: row.len(),
            }
        );
        let values: Vec<FieldValue> = row.iter().map(FieldValue::parse).collect();
        records.push(Record::new(lineno, values));
    }
    info!(
        "Discarded the first {} meta data lines.",
        options.metadata_lines
    );
    info!("Parsed {} survey responses.", records.len());
    Collection::new(schema, records)
}
