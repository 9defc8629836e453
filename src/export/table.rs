// Table export: one JSON object per example

use serde_json::{Map, Value};

use crate::config::ColumnsConfig;
use crate::state::{AnnotationRecord, CHANGED_COLUMN, Example};
use crate::task::TaskSpec;

/// Rows in session order. Columns that came in with the dataset are kept;
/// multi-label tasks get one boolean column per label instead of a value
/// column.
pub fn to_table(
    records: &[AnnotationRecord<Example>],
    task: &TaskSpec,
    columns: &ColumnsConfig,
) -> Value {
    Value::Array(
        records
            .iter()
            .map(|record| Value::Object(row(record, task, columns)))
            .collect(),
    )
}

fn row(
    record: &AnnotationRecord<Example>,
    task: &TaskSpec,
    columns: &ColumnsConfig,
) -> Map<String, Value> {
    let example = &record.example;
    let mut row = Map::new();
    if let Some(id) = &example.id {
        row.insert(columns.id.clone(), id.clone());
    }
    row.insert(columns.example.clone(), example.content.clone());
    for (key, value) in &example.extra {
        row.insert(key.clone(), value.clone());
    }

    match task {
        TaskSpec::MultiLabel(labels) => {
            for label in labels {
                row.insert(label.clone(), Value::Bool(record.value.has_label(label)));
            }
        }
        _ => {
            row.insert(columns.value.clone(), task.value_to_json(&record.value));
        }
    }
    row.insert(CHANGED_COLUMN.to_string(), Value::Bool(record.changed));
    row
}
