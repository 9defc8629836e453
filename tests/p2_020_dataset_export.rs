// P2-020: Tabular input and export
// Test: load a table from disk, annotate it, export it and load it back
// Expected: extra columns survive, labels and changed flags round-trip

mod test_helpers;

use std::fs;

use annotate::config::ColumnsConfig;
use annotate::export::{ExportResult, OutputFormat, render_export, save_export, write_export};
use annotate::state::load_dataset;
use annotate::{AnnotationSession, DatasetError, LabelValue};
use serde_json::{Value, json};
use test_helpers::*;

#[test]
fn table_round_trip_keeps_columns_and_labels() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(
        dir.path(),
        "reviews.json",
        r#"[
            {"id": "r1", "example": "great", "source": "web"},
            {"id": "r2", "example": "awful", "source": "app"}
        ]"#,
    );
    let task = sentiment_task();
    let columns = ColumnsConfig::default();

    let dataset = load_dataset(&input, &task, &columns).unwrap();
    assert!(dataset.tabular);
    let mut s = AnnotationSession::from_records(dataset.records, task.clone()).build();
    let first = s.advance().unwrap();
    assert_eq!(first.intent().unwrap().id.as_deref(), Some("r1"));
    assert_eq!(
        s.progress_summary().to_string(),
        "0 of 2 Examples annotated, Current Position: 1 (id: r1) "
    );
    s.submit(LabelValue::label("pos")).unwrap();

    let out = dir.path().join("out").join("labels.json");
    let result = save_export(&out, s.results(), s.task(), &columns, OutputFormat::Table).unwrap();
    assert_eq!(
        result,
        ExportResult {
            rows_exported: 2,
            changed: 1
        }
    );

    let written: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(
        written,
        json!([
            {"id": "r1", "example": "great", "source": "web", "label": "pos", "changed": true},
            {"id": "r2", "example": "awful", "source": "app", "label": null, "changed": false},
        ])
    );

    let reloaded = load_dataset(&out, &task, &columns).unwrap();
    assert_eq!(reloaded.records[0].value, LabelValue::label("pos"));
    assert!(reloaded.records[0].changed);
    assert!(!reloaded.records[1].changed);
    assert_eq!(
        reloaded.records[1].example.extra.get("source"),
        Some(&json!("app"))
    );
}

#[test]
fn mapping_export_lists_only_changed_examples() {
    let mut s = AnnotationSession::builder(
        ["a", "b", "c"].map(annotate::Example::new),
        score_task(),
    )
    .build();
    s.advance().unwrap();
    s.submit(LabelValue::Number(3.0)).unwrap();
    s.skip().unwrap();
    s.submit(LabelValue::Number(10.0)).unwrap();

    let mut buffer = Vec::new();
    let result = write_export(
        &mut buffer,
        s.results(),
        s.task(),
        &ColumnsConfig::default(),
        OutputFormat::Mapping,
    )
    .unwrap();
    assert_eq!(result.rows_exported, 2);
    let written: Value = serde_json::from_slice(&buffer).unwrap();
    assert_eq!(written, json!({"a": 3, "c": 10}));
}

#[test]
fn custom_columns_and_multi_label_tables() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(
        dir.path(),
        "pets.json",
        r#"[
            {"key": 1, "text": "a cat", "cat": true, "dog": false, "bird": false, "changed": true},
            {"key": 2, "text": "a dog and a bird"}
        ]"#,
    );
    let columns = ColumnsConfig {
        example: "text".into(),
        value: "tags".into(),
        id: "key".into(),
    };
    let dataset = load_dataset(&input, &pets_task(), &columns).unwrap();
    let mut s = AnnotationSession::from_records(dataset.records, pets_task()).build();
    s.advance().unwrap();
    s.skip().unwrap();
    s.submit(LabelValue::labels(["dog", "bird"])).unwrap();

    let table = render_export(s.results(), s.task(), &columns, OutputFormat::Table);
    assert_eq!(
        table,
        json!([
            {"key": 1, "text": "a cat", "cat": true, "dog": false, "bird": false, "changed": true},
            {"key": 2, "text": "a dog and a bird", "cat": false, "dog": true, "bird": true, "changed": true},
        ])
    );
}

#[test]
fn unreadable_inputs_name_the_problem() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(matches!(
        load_dataset(&missing, &sentiment_task(), &ColumnsConfig::default()),
        Err(DatasetError::Read { .. })
    ));

    let broken = write_file(dir.path(), "broken.json", "[\"a\",");
    assert!(matches!(
        load_dataset(&broken, &sentiment_task(), &ColumnsConfig::default()),
        Err(DatasetError::Parse { .. })
    ));

    let object = write_file(dir.path(), "object.json", r#"{"example": "a"}"#);
    assert!(matches!(
        load_dataset(&object, &sentiment_task(), &ColumnsConfig::default()),
        Err(DatasetError::NotAnArray)
    ));
}

#[test]
fn output_format_names() {
    assert_eq!("dataframe".parse::<OutputFormat>(), Ok(OutputFormat::Table));
    assert_eq!("dict".parse::<OutputFormat>(), Ok(OutputFormat::Mapping));
    assert!("csv".parse::<OutputFormat>().is_err());
}
