use log::{debug, info};

use crate::collection::Collection;
use crate::errors::*;
use crate::record::FieldValue;

/// A question with a known correct answer, used to detect low-effort respondents.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AttentionCheck {
    pub question: String,
    /// The expected answer. For a multiple choice question, the exact set of codes.
    pub answer: FieldValue,
}

impl AttentionCheck {
    /// Builds a check from the textual answer, e.g. `"3,4"` for the set {3, 4}.
    pub fn new(question: &str, answer: &str) -> AttentionCheck {
        AttentionCheck {
            question: question.to_string(),
            answer: FieldValue::parse(answer),
        }
    }
}

/// The heuristics used to weed out incomplete and low-quality responses.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PruneRules {
    pub finished_question: String,
    pub finished_answer: String,
    pub attention_checks: Vec<AttentionCheck>,
    pub min_correct: usize,
}

impl PruneRules {
    /// Responses must have finished the survey and gotten at least two out of
    /// four attention checks correct.
    pub fn reference() -> PruneRules {
        PruneRules {
            finished_question: "finished".to_string(),
            finished_answer: "1".to_string(),
            attention_checks: vec![
                AttentionCheck::new("q2_5", "3,4"),
                AttentionCheck::new("q3_12", "2"),
                AttentionCheck::new("q5_8", "4"),
                AttentionCheck::new("q6_8", "1"),
            ],
            min_correct: 2,
        }
    }
}

impl Default for PruneRules {
    fn default() -> Self {
        PruneRules::reference()
    }
}

/// Sizes of the collection after each pruning step.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct PruneReport {
    pub initial: usize,
    pub finished: usize,
    pub attentive: usize,
}

/// Share of `part` in `total`, as a percentage. Zero for an empty total.
pub fn share(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Removes the responses that did not finish the survey, then the ones that
/// failed too many attention checks.
///
/// Completion is checked first: unfinished responses cannot be scored.
pub fn prune(
    collection: &Collection,
    rules: &PruneRules,
) -> SurveyResult<(Collection, PruneReport)> {
    let initial = collection.len();
    info!("Starting with {} responses before pruning.", initial);

    let mut res = collection.filter(&rules.finished_question, &rules.finished_answer)?;
    let finished = res.len();
    info!(
        "{} ({:.2}%) responses left after pruning non-finished responses.",
        finished,
        share(finished, initial)
    );

    let schema = collection.schema().clone();
    let mut checks = Vec::with_capacity(rules.attention_checks.len());
    for check in rules.attention_checks.iter() {
        checks.push((schema.field(&check.question)?, &check.answer));
    }

    res.retain(|r| {
        let correct = checks
            .iter()
            .filter(|(field, expected)| r.get(*field).same_answer(expected))
            .count();
        if correct < rules.min_correct {
            debug!(
                "prune: line {}: {} attention checks correct, dropping",
                r.lineno, correct
            );
        }
        correct >= rules.min_correct
    });
    let attentive = res.len();
    info!(
        "{} ({:.2}%) responses left after pruning failed attention checks.",
        attentive,
        share(attentive, initial)
    );

    Ok((
        res,
        PruneReport {
            initial,
            finished,
            attentive,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::*;
    use std::sync::Arc;

    const FIELDS: &[&str] = &["id", "finished", "q2_5", "q3_12", "q5_8", "q6_8"];

    fn collection(rows: &[&[&str]]) -> Collection {
        let records = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                Record::new(
                    idx as u64 + 1,
                    row.iter().map(|s| FieldValue::parse(s)).collect(),
                )
            })
            .collect();
        Collection::new(Arc::new(Schema::new(FIELDS)), records).unwrap()
    }

    fn ids(c: &Collection) -> Vec<String> {
        c.iter()
            .map(|r| format!("{:?}", r.values()[0]))
            .collect()
    }

    fn sample() -> Collection {
        collection(&[
            // All four checks right.
            &["r1", "1", "3,4", "2", "4", "1"],
            // Two right.
            &["r2", "1", "3", "2", "4", "5"],
            // One right: dropped.
            &["r3", "1", "3", "1", "4", "5"],
            // Perfect but unfinished: dropped.
            &["r4", "0", "3,4", "2", "4", "1"],
            // None right: dropped.
            &["r5", "1", "", "", "", ""],
            // Right only on the multiple choice and the last one.
            &["r6", "1", "4,3", "5", "1", "1"],
        ])
    }

    #[test]
    fn reference_rules() {
        let c = sample();
        let (res, report) = prune(&c, &PruneRules::reference()).unwrap();
        assert_eq!(
            ids(&res),
            vec![
                "Scalar(\"r1\")".to_string(),
                "Scalar(\"r2\")".to_string(),
                "Scalar(\"r6\")".to_string()
            ]
        );
        assert_eq!(
            report,
            PruneReport {
                initial: 6,
                finished: 5,
                attentive: 3
            }
        );
        // The source is left untouched.
        assert_eq!(c.len(), 6);
    }

    #[test]
    fn consecutive_failures_are_all_removed() {
        let c = collection(&[
            &["r1", "1", "", "", "", ""],
            &["r2", "1", "", "", "", ""],
            &["r3", "1", "", "", "", ""],
        ]);
        let (res, _) = prune(&c, &PruneRules::reference()).unwrap();
        assert!(res.is_empty());
    }

    #[test]
    fn nobody_finished() {
        let c = collection(&[
            &["r1", "0", "3,4", "2", "4", "1"],
            &["r2", "", "3,4", "2", "4", "1"],
        ]);
        let (res, report) = prune(&c, &PruneRules::reference()).unwrap();
        assert!(res.is_empty());
        assert_eq!(report.finished, 0);
        assert_eq!(report.attentive, 0);
    }

    #[test]
    fn deterministic() {
        let a = sample();
        let b = a.clone();
        let (ra, _) = prune(&a, &PruneRules::reference()).unwrap();
        let (rb, _) = prune(&b, &PruneRules::reference()).unwrap();
        assert_eq!(ra, rb);
    }

    #[test]
    fn unknown_check_question() {
        let mut rules = PruneRules::reference();
        rules.attention_checks.push(AttentionCheck::new("q9_1", "1"));
        assert!(matches!(
            prune(&sample(), &rules),
            Err(SurveyError::UnknownField { .. })
        ));
    }

    #[test]
    fn share_of_empty() {
        assert_eq!(share(0, 0), 0.0);
        assert_eq!(share(1, 4), 25.0);
    }
}
