use crate::analysis::*;

use serde::{Deserialize, Serialize};

use std::fs;

use survey_stats::{AttentionCheck, PruneRules, ReadOptions, Schema};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct AttentionCheckConfig {
    pub question: String,
    /// Comma-separated codes for a multiple choice question.
    pub answer: String,
}

/// A named subset of the respondents: the ones whose answer to the question
/// only uses allowed codes.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DemographicConfig {
    pub name: String,
    pub question: String,
    pub allowed: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ReportLine {
    pub answer: String,
    pub label: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ReportSection {
    /// The question number as printed, e.g. "2.3".
    pub question: String,
    pub field: String,
    pub lines: Vec<ReportLine>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ReportBlock {
    pub title: String,
    pub sections: Vec<ReportSection>,
}

/// The configuration of an analysis. Everything left out falls back to the
/// reference study.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// The names of the columns, in order.
    pub fields: Option<Vec<String>>,
    #[serde(rename = "metadataLines")]
    pub metadata_lines: Option<usize>,
    pub encoding: Option<String>,
    #[serde(rename = "finishedField")]
    pub finished_field: Option<String>,
    #[serde(rename = "finishedValue")]
    pub finished_value: Option<String>,
    #[serde(rename = "minCorrect")]
    pub min_correct: Option<usize>,
    #[serde(rename = "attentionChecks")]
    pub attention_checks: Option<Vec<AttentionCheckConfig>>,
    pub demographics: Option<Vec<DemographicConfig>>,
    pub blocks: Option<Vec<ReportBlock>>,
}

impl AnalysisConfig {
    pub fn schema(&self) -> Schema {
        match &self.fields {
            Some(fields) => Schema::new(fields.as_slice()),
            None => Schema::reference(),
        }
    }

    pub fn read_options(&self) -> AnalysisResult<ReadOptions> {
        let mut options = ReadOptions::default();
        if let Some(n) = self.metadata_lines {
            options.metadata_lines = n;
        }
        if let Some(label) = &self.encoding {
            options = options
                .with_encoding_label(label)
                .context(SurveySnafu {})?;
        }
        Ok(options)
    }

    pub fn prune_rules(&self) -> PruneRules {
        let mut rules = PruneRules::reference();
        if let Some(q) = &self.finished_field {
            rules.finished_question = q.clone();
        }
        if let Some(a) = &self.finished_value {
            rules.finished_answer = a.clone();
        }
        if let Some(n) = self.min_correct {
            rules.min_correct = n;
        }
        if let Some(checks) = &self.attention_checks {
            rules.attention_checks = checks
                .iter()
                .map(|c| AttentionCheck::new(&c.question, &c.answer))
                .collect();
        }
        rules
    }

    pub fn demographics(&self) -> Vec<DemographicConfig> {
        self.demographics
            .clone()
            .unwrap_or_else(default_demographics)
    }

    pub fn blocks(&self) -> Vec<ReportBlock> {
        self.blocks.clone().unwrap_or_else(default_blocks)
    }
}

pub fn read_config(path: &str) -> AnalysisResult<AnalysisConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: AnalysisConfig =
        serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

fn demographic(name: &str, question: &str, allowed: &[&str]) -> DemographicConfig {
    DemographicConfig {
        name: name.to_string(),
        question: question.to_string(),
        allowed: allowed.iter().map(|s| s.to_string()).collect(),
    }
}

fn default_demographics() -> Vec<DemographicConfig> {
    vec![
        // Undergraduate or graduate degree.
        demographic("graduates", "q1_5", &["3", "4"]),
        // Highly knowledgeable or experts in Internet privacy and security.
        demographic("experts", "q1_6", &["4", "5"]),
        // Tor Browser as main browser, or Tor used daily.
        demographic("frequentUsers", "q2_3", &["1", "6"]),
    ]
}

fn section(question: &str, field: &str, lines: &[(&str, &str)]) -> ReportSection {
    ReportSection {
        question: question.to_string(),
        field: field.to_string(),
        lines: lines
            .iter()
            .map(|(answer, label)| ReportLine {
                answer: answer.to_string(),
                label: label.to_string(),
            })
            .collect(),
    }
}

fn default_blocks() -> Vec<ReportBlock> {
    vec![
        ReportBlock {
            title: "Tor usage".to_string(),
            sections: vec![
                section(
                    "2.3",
                    "q2_3",
                    &[
                        ("5", "never use Tor Browser."),
                        ("4", "use Tor Browser less than monthly."),
                        ("3", "use Tor Browser once a month."),
                        ("2", "use Tor Browser once a week."),
                        ("1", "use Tor Browser once a day."),
                        ("6", "use Tor Browser as main browser."),
                    ],
                ),
                section(
                    "2.4",
                    "q2_4",
                    &[
                        ("1", "worry about their government."),
                        ("2", "worry about other governments."),
                        ("3", "worry about their ISP."),
                        ("4", "worry about their school."),
                        ("5", "worry about their employer."),
                        ("6", "worry about their friends and family."),
                        ("7", "worry about ad companies."),
                        ("8", "worry about hackers in open WiFis."),
                        ("9", "worry about other actors."),
                    ],
                ),
            ],
        },
        ReportBlock {
            title: "onion site usage".to_string(),
            sections: vec![
                section(
                    "3.3",
                    "q3_3",
                    &[
                        ("5", "never used onion sites."),
                        ("4", "use onion sites < monthly."),
                        ("3", "use onion sites monthly."),
                        ("2", "use onion sites weekly."),
                        ("1", "use onion sites daily."),
                    ],
                ),
                section(
                    "3.4",
                    "q3_4",
                    &[
                        ("5", "never use OSs for non-browsing."),
                        ("4", "use OSs for non-browsing < monthly."),
                        ("3", "use OSs for non-browsing monthly."),
                        ("2", "use OSs for non-browsing weekly."),
                        ("1", "use OSs for non-browsing daily."),
                    ],
                ),
                section(
                    "3.5",
                    "q3_5",
                    &[
                        ("1", "b/c of more anonymity"),
                        ("2", "b/c of more security"),
                        ("3", "b/c some sites are only onions"),
                        ("4", "just click on random links"),
                        ("5", "curious about the dark web"),
                        ("6", "b/c of other reasons"),
                    ],
                ),
                section(
                    "3.6",
                    "q3_6",
                    &[
                        ("2", "from social networking"),
                        ("1", "from search engine lists"),
                        ("4", "from random encounters"),
                        ("3", "from friends/family"),
                        ("6", "from other"),
                        ("5", "are not interested"),
                    ],
                ),
                section(
                    "3.8",
                    "q3_8",
                    &[
                        ("1", "save list on computer"),
                        ("2", "write them down using pen & paper"),
                        ("3", "bookmark in tor browser"),
                        ("4", "use web-based bookmarking service"),
                        ("5", "use search engine each time"),
                        ("9", "use trusted sites for onion links"),
                        ("6", "memorize some onion domains"),
                        ("7", "don't have a good solution"),
                        ("8", "other"),
                    ],
                ),
            ],
        },
    ]
}
