use snafu::Snafu;

/// Errors raised while loading or aggregating survey responses.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SurveyError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Could not decode {path} as {encoding}"))]
    Decoding { path: String, encoding: String },
    #[snafu(display("Unknown text encoding {label:?}"))]
    UnknownEncoding { label: String },
    #[snafu(display("Malformed row at line {lineno}"))]
    TsvLineParse { source: csv::Error, lineno: u64 },
    #[snafu(display("Line {lineno}: expected {expected} fields but found {found}"))]
    RowWidth {
        lineno: u64,
        expected: usize,
        found: usize,
    },
    #[snafu(display("Unknown field {field:?}"))]
    UnknownField { field: String },
    // A ratio over a question nobody answered is undefined, not zero.
    #[snafu(display("No response answered question {field:?}"))]
    NoAnswers { field: String },
    #[snafu(display("Error writing to {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
}

pub type SurveyResult<T> = Result<T, SurveyError>;
