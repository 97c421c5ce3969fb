use std::collections::{BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;
use snafu::OptionExt;

use crate::errors::*;

// Answers to "choose all that apply" questions are exported as a comma-separated list
// of codes, e.g.: 1,4,5,9
static CHOICE_LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d(,\d+)*$").unwrap());

/// The column layout of the survey export used by the reference study.
const REFERENCE_FIELDS: &[&str] = &[
    "start_date", "end_date", "status", "ip_addr", "progress", "duration", "finished",
    "recorded_date", "id", "last_name", "first_name", "email", "ext_ref", "latitude",
    "longitude", "dist_channel", "language", "q1_1", "q1_3", "q1_4", "q1_5", "q1_6", "q2_1",
    "q2_2", "q2_3", "q2_4", "q2_4_text", "q2_5", "q2_5_text", "q3_3", "q3_4", "q3_5",
    "q3_5_text", "q3_6", "q3_6_text", "q3_7", "q3_7_text", "q3_8", "q3_8_text", "q3_9",
    "q3_9_text_1", "q3_9_text_2", "q3_10", "q3_11", "q3_12", "q3_13", "q3_14", "q3_15",
    "q3_15_text", "q3_16_1", "q3_16_2", "q3_16_3", "q3_16_4", "q3_17", "q3_18", "q3_18_text",
    "q3_19", "q3_20", "q3_20_text", "q3_21", "q3_22_1", "q3_22_2", "q3_22_3", "q3_22_4",
    "q3_22_5", "q3_22_6", "q4_2", "q4_3", "q4_3_text", "q4_4", "q4_4_text", "q4_5", "q4_6_1",
    "q4_6_3", "q4_6_2", "q5_2", "q5_3", "q5_4", "q5_4_text", "q5_5", "q5_6", "q5_6_text",
    "q5_7", "q5_8", "q5_9", "q5_11", "q5_11_text", "q6_2", "q6_2_text", "q6_3", "q6_3_text",
    "q6_4", "q6_5", "q6_6", "q6_7", "q6_8", "q6_9", "q6_9_text", "q6_10_1", "q6_10_2",
    "q6_10_3", "q7_2", "bogus1", "bogus2", "bogus3", "bogus4",
];

/// The ordered, fixed set of field names shared by all the records of a run.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Schema {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

/// The position of a field in a record, resolved against a schema.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct FieldIndex(usize);

impl Schema {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Schema {
        let names: Vec<String> = names.iter().map(|s| s.as_ref().to_string()).collect();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for (idx, name) in names.iter().enumerate() {
            positions.entry(name.clone()).or_insert(idx);
        }
        Schema { names, positions }
    }

    /// The 106 columns of the Qualtrics export analysed by the reference study.
    pub fn reference() -> Schema {
        Schema::new(REFERENCE_FIELDS)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Resolves a field name, failing for names that are not part of the schema.
    pub fn field(&self, name: &str) -> SurveyResult<FieldIndex> {
        self.positions
            .get(name)
            .map(|idx| FieldIndex(*idx))
            .context(UnknownFieldSnafu { field: name })
    }
}

/// The value of one field in one response.
///
/// The shape is decided once, from the raw text, when the row is parsed.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum FieldValue {
    /// A single textual answer. The empty string means the question was left unanswered.
    Scalar(String),
    /// The codes selected in a multiple choice question. Never empty.
    Choices(BTreeSet<String>),
}

impl FieldValue {
    pub fn parse(raw: &str) -> FieldValue {
        let trimmed = raw.trim();
        if CHOICE_LIST.is_match(trimmed) {
            FieldValue::Choices(trimmed.split(',').map(|s| s.to_string()).collect())
        } else {
            FieldValue::Scalar(raw.to_string())
        }
    }

    pub fn is_answered(&self) -> bool {
        match self {
            FieldValue::Scalar(s) => !s.is_empty(),
            FieldValue::Choices(_) => true,
        }
    }

    /// True if the respondent picked the given answer: membership for choices,
    /// equality for scalars.
    pub fn selects(&self, answer: &str) -> bool {
        match self {
            FieldValue::Scalar(s) => s == answer,
            FieldValue::Choices(codes) => codes.contains(answer),
        }
    }

    /// True if the whole answer is exactly the given text.
    ///
    /// Unlike `selects`, a choice list only matches when it is precisely the
    /// (comma-separated) list given, so `1,4` is not exactly `1`.
    pub fn is_exactly(&self, answer: &str) -> bool {
        match self {
            FieldValue::Scalar(s) => s == answer,
            FieldValue::Choices(codes) => {
                codes.len() == answer.split(',').count()
                    && answer.split(',').all(|code| codes.contains(code.trim()))
            }
        }
    }

    /// The codes carried by this value. A blank scalar carries none, any other
    /// scalar carries itself.
    pub fn codes(&self) -> BTreeSet<&str> {
        match self {
            FieldValue::Scalar(s) if s.is_empty() => BTreeSet::new(),
            FieldValue::Scalar(s) => [s.as_str()].into_iter().collect(),
            FieldValue::Choices(codes) => codes.iter().map(|s| s.as_str()).collect(),
        }
    }

    /// Compares two answers regardless of how their shape was inferred, i.e.
    /// `Scalar("2")` and `Choices({"2"})` are the same answer.
    pub fn same_answer(&self, other: &FieldValue) -> bool {
        self.codes() == other.codes()
    }
}

/// One parsed survey response.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Record {
    /// Line of the input file the response starts at (1-based).
    pub lineno: u64,
    values: Vec<FieldValue>,
}

impl Record {
    pub fn new(lineno: u64, values: Vec<FieldValue>) -> Record {
        Record { lineno, values }
    }

    pub fn get(&self, field: FieldIndex) -> &FieldValue {
        &self.values[field.0]
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }
}
