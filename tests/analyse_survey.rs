use std::fs;

use survey_analysis::analysis::{run_analysis, AnalysisError};
use survey_analysis::args::Args;

const CONFIG: &str = r#"{
    "fields": ["id", "finished", "q1", "check1", "check2"],
    "metadataLines": 1,
    "encoding": "utf-8",
    "minCorrect": 1,
    "attentionChecks": [
        {"question": "check1", "answer": "3,4"},
        {"question": "check2", "answer": "2"}
    ],
    "demographics": [{"name": "early", "question": "q1", "allowed": ["1"]}],
    "blocks": [{
        "title": "usage",
        "sections": [{
            "question": "1",
            "field": "q1",
            "lines": [
                {"answer": "1", "label": "daily"},
                {"answer": "2", "label": "weekly"}
            ]
        }]
    }]
}"#;

const SURVEY: &str = "ID\tFinished\tQ1\tC1\tC2
R_1\t1\t1\t3,4\t2
R_2\t1\t2\t3\t2
R_3\t1\t2\t3\t1
R_4\t0\t1\t3,4\t2
R_5\t1\t\t4,3\t9
";

fn args(dir: &std::path::Path) -> Args {
    fs::write(dir.join("config.json"), CONFIG).unwrap();
    fs::write(dir.join("survey.tsv"), SURVEY).unwrap();
    Args {
        input: dir.join("survey.tsv").display().to_string(),
        config: Some(dir.join("config.json").display().to_string()),
        demographic: None,
        out: Some(dir.join("summary.json").display().to_string()),
        reference: None,
        encoding: None,
        verbose: false,
    }
}

#[test]
fn summary_and_reference() {
    let dir = tempfile::tempdir().unwrap();
    let args = args(dir.path());
    run_analysis(&args).unwrap();

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("summary.json")).unwrap())
            .unwrap();
    assert_eq!(summary["pruning"]["initial"], 5);
    assert_eq!(summary["pruning"]["finished"], 4);
    // R_3 fails both checks.
    assert_eq!(summary["pruning"]["attentive"], 3);
    let q1 = &summary["results"][0]["questions"][0];
    assert_eq!(q1["answered"], 2);
    assert_eq!(q1["unanswered"], 1);
    assert_eq!(q1["answers"][0]["count"], 1);
    assert_eq!(q1["answers"][0]["percentage"], 50.0);

    // The summary just written is its own reference.
    let checked = Args {
        out: None,
        reference: Some(dir.path().join("summary.json").display().to_string()),
        ..args
    };
    run_analysis(&checked).unwrap();
}

#[test]
fn reference_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("reference.json");
    fs::write(&reference, "{\"results\": []}").unwrap();
    let args = Args {
        out: None,
        reference: Some(reference.display().to_string()),
        ..args(dir.path())
    };
    assert!(matches!(
        run_analysis(&args),
        Err(AnalysisError::Whatever { .. })
    ));
}

#[test]
fn demographic_without_answers() {
    let dir = tempfile::tempdir().unwrap();
    let args = Args {
        demographic: Some("early".to_string()),
        out: None,
        ..args(dir.path())
    };
    // R_1 is the only early respondent, every ratio is still defined.
    run_analysis(&args).unwrap();

    let unknown = Args {
        demographic: Some("late".to_string()),
        ..args
    };
    assert!(run_analysis(&unknown).is_err());
}

#[test]
fn missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let args = Args {
        input: dir.path().join("nope.tsv").display().to_string(),
        out: None,
        ..args(dir.path())
    };
    assert!(matches!(
        run_analysis(&args),
        Err(AnalysisError::Survey { .. })
    ));
}
