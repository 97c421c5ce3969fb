use log::debug;
use snafu::ensure;

use std::sync::Arc;

use crate::errors::*;
use crate::record::*;

/// An ordered group of responses, e.g. all the valid responses or a demographic.
///
/// Filtering returns a new collection owning its own copy of the matching records.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Collection {
    schema: Arc<Schema>,
    records: Vec<Record>,
}

impl Collection {
    /// Groups records under a schema. Every record must have one value per field.
    pub fn new(schema: Arc<Schema>, records: Vec<Record>) -> SurveyResult<Collection> {
        for r in records.iter() {
            ensure!(
                r.values().len() == schema.len(),
                RowWidthSnafu {
                    lineno: r.lineno,
                    expected: schema.len(),
                    found: r.values().len(),
                }
            );
        }
        Ok(Collection { schema, records })
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Removes in place the records that do not satisfy the predicate.
    pub fn retain<F: FnMut(&Record) -> bool>(&mut self, f: F) {
        self.records.retain(f);
    }

    fn select<F: Fn(&Record) -> bool>(&self, f: F) -> Collection {
        Collection {
            schema: self.schema.clone(),
            records: self.records.iter().filter(|r| f(r)).cloned().collect(),
        }
    }

    /// The responses that gave the answer to the question.
    ///
    /// For a multiple choice answer, the answer must be one of the selected codes.
    /// For any other answer, it must be the exact text.
    pub fn filter(&self, question: &str, answer: &str) -> SurveyResult<Collection> {
        let field = self.schema.field(question)?;
        let res = self.select(|r| r.get(field).selects(answer));
        debug!(
            "filter: {}={:?}: {} out of {}",
            question,
            answer,
            res.len(),
            self.len()
        );
        Ok(res)
    }

    /// Number of responses that did not leave the question blank.
    pub fn answered(&self, question: &str) -> SurveyResult<usize> {
        let field = self.schema.field(question)?;
        Ok(self.iter().filter(|r| r.get(field).is_answered()).count())
    }

    /// Fraction of the responses that answered the question and gave the answer.
    ///
    /// Fails if nobody answered the question.
    pub fn fraction(&self, question: &str, answer: &str) -> SurveyResult<f64> {
        let total = self.answered(question)?;
        ensure!(total > 0, NoAnswersSnafu { field: question });
        let selected = self.filter(question, answer)?.len();
        Ok(selected as f64 / total as f64)
    }

    pub fn percentage(&self, question: &str, answer: &str) -> SurveyResult<f64> {
        Ok(self.fraction(question, answer)? * 100.0)
    }

    /// Number of responses whose whole answer is exactly the given text.
    ///
    /// Passing the empty string counts the responses that left the question blank.
    pub fn count(&self, question: &str, answer: &str) -> SurveyResult<usize> {
        let field = self.schema.field(question)?;
        Ok(self.iter().filter(|r| r.get(field).is_exactly(answer)).count())
    }

    /// The responses whose answer only contains codes from the allowed list.
    /// Blank answers are not part of any such subset.
    pub fn select_within(&self, question: &str, allowed: &[String]) -> SurveyResult<Collection> {
        let field = self.schema.field(question)?;
        Ok(self.select(|r| {
            let value = r.get(field);
            value.is_answered()
                && value
                    .codes()
                    .iter()
                    .all(|code| allowed.iter().any(|a| a == code))
        }))
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
