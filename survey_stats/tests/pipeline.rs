use std::fs;
use std::sync::Arc;

use survey_stats::names::{read_names, write_pairs};
use survey_stats::similarity::{scan_pairs, Metric, DEFAULT_THRESHOLD};
use survey_stats::*;

const FIELDS: &[&str] = &["id", "finished", "q1_5", "q2_3", "q2_5", "q3_12", "q5_8", "q6_8"];

fn utf16_export(rows: &[&str]) -> Vec<u8> {
    let mut bytes: Vec<u8> = vec![0xFF, 0xFE];
    for row in rows {
        for unit in row.encode_utf16().chain("\n".encode_utf16()) {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
    }
    bytes
}

fn export() -> Vec<u8> {
    utf16_export(&[
        "ResponseID\tFinished\tQ1.5\tQ2.3\tQ2.5\tQ3.12\tQ5.8\tQ6.8",
        "ImportId:responseId\tImportId:finished\t\t\t\t\t\t",
        "Response ID\tFinished\tEducation\tTor Browser\tCheck 1\tCheck 2\tCheck 3\tCheck 4",
        "R_1\t1\t3\t1\t3,4\t2\t4\t1",
        "R_2\t1\t4\t6\t3,4\t2\t1\t5",
        "R_3\t1\t1\t1\t3\t1\t1\t5",
        "R_4\t0\t3\t1\t3,4\t2\t4\t1",
        "R_5\t1\t2,3\t\t3,4\t2\t4\t1",
        "R_6\t1\tÉcole\t5\t3,4\t2\t4\t1",
    ])
}

#[test]
fn survey_pipeline() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("survey.tsv");
    fs::write(&path, export()).unwrap();

    let schema = Arc::new(Schema::new(FIELDS));
    let responses = read_survey(&path, schema, &ReadOptions::default()).unwrap();
    assert_eq!(responses.len(), 6);

    let (population, report) = prune(&responses, &PruneRules::reference()).unwrap();
    assert_eq!(report.initial, 6);
    assert_eq!(report.finished, 5);
    assert_eq!(report.attentive, 4);
    assert_eq!(population.len(), 4);

    // R_1, R_2, R_5, R_6 remain; R_5 left q2_3 blank.
    assert_eq!(population.answered("q2_3").unwrap(), 3);
    assert_eq!(population.count("q2_3", "").unwrap(), 1);
    let pct = population.percentage("q2_3", "1").unwrap();
    assert_eq!(pct, 100.0 * population.fraction("q2_3", "1").unwrap());
    assert!((pct - 100.0 / 3.0).abs() < 1e-9);

    let graduates = population
        .select_within("q1_5", &["3".to_string(), "4".to_string()])
        .unwrap();
    assert_eq!(graduates.len(), 2);
    assert_eq!(population.filter("q1_5", "3").unwrap().len(), 2);
    assert_eq!(population.filter("q1_5", "École").unwrap().len(), 1);
}

#[test]
fn missing_survey_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.tsv");
    let err = read_survey(
        &path,
        Arc::new(Schema::reference()),
        &ReadOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SurveyError::OpeningFile { .. }));
}

#[test]
fn reference_width_is_enforced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("survey.tsv");
    fs::write(&path, export()).unwrap();
    let err = read_survey(
        &path,
        Arc::new(Schema::reference()),
        &ReadOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SurveyError::RowWidth {
            lineno: 4,
            expected: 106,
            found: 8
        }
    ));
}

#[test]
fn name_pairs_file() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("names.csv");
    let output = dir.path().join("pairs.csv");
    fs::write(&input, "alice,1\nalise,2\nbob,3\nalice,4\n").unwrap();

    let names = read_names(&input).unwrap();
    assert_eq!(names.len(), 4);
    let metric = Metric::default();
    let pairs = scan_pairs(&names, metric, DEFAULT_THRESHOLD);
    write_pairs(&output, &pairs, metric).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("alice,alise,0.9"));
    assert!(!written.contains("bob"));
}
