//! Dataset loading: JSON lists of examples or tables of row objects.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::config::ColumnsConfig;
use crate::error::DatasetError;
use crate::state::types::{AnnotationRecord, Example, value_text};
use crate::task::{LabelValue, TaskSpec};

/// Name of the bookkeeping column written to and read from tables.
pub const CHANGED_COLUMN: &str = "changed";

/// Loaded examples plus whether they came from a table of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub records: Vec<AnnotationRecord<Example>>,
    pub tabular: bool,
}

/// Load a dataset from a JSON file
pub fn load_dataset(
    path: &Path,
    task: &TaskSpec,
    columns: &ColumnsConfig,
) -> Result<Dataset, DatasetError> {
    let content = fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: Value = serde_json::from_str(&content).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = parse_dataset(parsed, task, columns)?;
    tracing::info!(
        path = %path.display(),
        examples = dataset.records.len(),
        tabular = dataset.tabular,
        "dataset loaded"
    );
    Ok(dataset)
}

/// Interpret a parsed JSON document as a dataset.
///
/// An array of objects is a table: the example column is required, the id
/// column is optional, stored labels are read back so earlier annotations
/// can be revised, and every other column is carried through untouched.
/// Any other array is a plain list of examples.
pub fn parse_dataset(
    document: Value,
    task: &TaskSpec,
    columns: &ColumnsConfig,
) -> Result<Dataset, DatasetError> {
    let Value::Array(items) = document else {
        return Err(DatasetError::NotAnArray);
    };

    let tabular = items.first().is_some_and(Value::is_object);
    let mut records = Vec::with_capacity(items.len());
    for (row, item) in items.into_iter().enumerate() {
        let record = match (tabular, item) {
            (true, Value::Object(fields)) => parse_row(row, fields, task, columns)?,
            (true, _) | (false, Value::Object(_)) => return Err(DatasetError::MixedRows { row }),
            (false, scalar) => AnnotationRecord::new(Example::new(scalar)),
        };
        records.push(record);
    }

    Ok(Dataset { records, tabular })
}

fn parse_row(
    row: usize,
    mut fields: Map<String, Value>,
    task: &TaskSpec,
    columns: &ColumnsConfig,
) -> Result<AnnotationRecord<Example>, DatasetError> {
    let content = fields
        .remove(&columns.example)
        .ok_or_else(|| DatasetError::MissingColumn {
            row,
            column: columns.example.clone(),
        })?;
    let id = fields.remove(&columns.id).filter(|id| !id.is_null());
    let changed = fields
        .remove(CHANGED_COLUMN)
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    let value = match task {
        TaskSpec::MultiLabel(labels) => {
            let mut chosen = Vec::new();
            for label in labels {
                if fields.remove(label).and_then(|v| v.as_bool()) == Some(true) {
                    chosen.push(label.clone());
                }
            }
            if changed || !chosen.is_empty() {
                LabelValue::Labels(chosen)
            } else {
                LabelValue::Unset
            }
        }
        _ => match fields.remove(&columns.value) {
            Some(stored) => task
                .value_from_json(&stored)
                .map_err(|source| DatasetError::StoredLabel { row, source })?,
            None => LabelValue::Unset,
        },
    };

    Ok(AnnotationRecord {
        id: id.as_ref().map(value_text),
        example: Example {
            content,
            id,
            extra: fields,
        },
        value,
        changed,
    })
}
