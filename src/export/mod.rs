// Export module for the supported output formats

pub mod mapping;
pub mod table;

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ColumnsConfig;
use crate::error::ExportError;
use crate::state::{AnnotationRecord, Example};
use crate::task::TaskSpec;

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every row with its value column(s) and the `changed` flag.
    #[default]
    Table,
    /// Only explicitly labeled examples, keyed by example text.
    Mapping,
}

impl OutputFormat {
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Mapping => "mapping",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" | "dataframe" => Ok(OutputFormat::Table),
            "mapping" | "dict" => Ok(OutputFormat::Mapping),
            other => Err(format!("unknown output format '{other}' (expected table or mapping)")),
        }
    }
}

/// Export result with statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    pub rows_exported: usize,
    pub changed: usize,
}

/// Build the JSON document for `records` in the requested format.
pub fn render_export(
    records: &[AnnotationRecord<Example>],
    task: &TaskSpec,
    columns: &ColumnsConfig,
    format: OutputFormat,
) -> Value {
    match format {
        OutputFormat::Table => table::to_table(records, task, columns),
        OutputFormat::Mapping => mapping::to_mapping(records, task),
    }
}

/// Write the export as pretty JSON to `writer`.
pub fn write_export<W: Write>(
    writer: &mut W,
    records: &[AnnotationRecord<Example>],
    task: &TaskSpec,
    columns: &ColumnsConfig,
    format: OutputFormat,
) -> Result<ExportResult, ExportError> {
    let document = render_export(records, task, columns, format);
    serde_json::to_writer_pretty(&mut *writer, &document)?;
    writeln!(writer)?;
    Ok(ExportResult {
        rows_exported: match &document {
            Value::Array(rows) => rows.len(),
            Value::Object(entries) => entries.len(),
            _ => 0,
        },
        changed: records.iter().filter(|r| r.changed).count(),
    })
}

/// Write the export to a file, creating parent directories as needed.
pub fn save_export(
    path: &Path,
    records: &[AnnotationRecord<Example>],
    task: &TaskSpec,
    columns: &ColumnsConfig,
    format: OutputFormat,
) -> Result<ExportResult, ExportError> {
    let write_error = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    let mut buffer = Vec::new();
    let result = write_export(&mut buffer, records, task, columns, format)?;
    fs::write(path, buffer).map_err(write_error)?;
    tracing::info!(
        path = %path.display(),
        format = %format,
        rows = result.rows_exported,
        "annotations exported"
    );
    Ok(result)
}
