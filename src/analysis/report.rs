use crate::analysis::config_reader::ReportBlock;
use crate::analysis::*;

use serde::Serialize;

use std::io::Write;

#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct AnswerStats {
    pub answer: String,
    pub label: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct QuestionStats {
    pub question: String,
    pub field: String,
    pub answered: usize,
    pub unanswered: usize,
    pub answers: Vec<AnswerStats>,
}

#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct BlockStats {
    pub title: String,
    pub questions: Vec<QuestionStats>,
}

/// Computes, for every answer listed in the report, how many respondents gave it.
///
/// Fails if one of the questions was answered by nobody in the collection.
pub fn tabulate(c: &Collection, blocks: &[ReportBlock]) -> SurveyResult<Vec<BlockStats>> {
    let mut res: Vec<BlockStats> = Vec::new();
    for block in blocks.iter() {
        info!("Analysing questions about {}.", block.title);
        let mut questions: Vec<QuestionStats> = Vec::new();
        for section in block.sections.iter() {
            let field = section.field.as_str();
            let mut answers: Vec<AnswerStats> = Vec::new();
            for line in section.lines.iter() {
                answers.push(AnswerStats {
                    answer: line.answer.clone(),
                    label: line.label.clone(),
                    count: c.filter(field, &line.answer)?.len(),
                    percentage: c.percentage(field, &line.answer)?,
                });
            }
            questions.push(QuestionStats {
                question: section.question.clone(),
                field: section.field.clone(),
                answered: c.answered(field)?,
                unanswered: c.count(field, "")?,
                answers,
            });
        }
        res.push(BlockStats {
            title: block.title.clone(),
            questions,
        });
    }
    Ok(res)
}

pub fn render<W: Write>(out: &mut W, blocks: &[BlockStats]) -> std::io::Result<()> {
    for block in blocks.iter() {
        for q in block.questions.iter() {
            writeln!(out, "---\nQuestion {}:", q.question)?;
            for a in q.answers.iter() {
                writeln!(out, "{:6.2}% {}", a.percentage, a.label)?;
            }
        }
    }
    Ok(())
}
